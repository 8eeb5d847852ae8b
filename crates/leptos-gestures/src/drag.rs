//! Drag Reordering
//!
//! Signal plumbing for mouse-driven drag-and-drop across ordered
//! containers. A mousedown arms a pending drag; crossing a small
//! movement threshold promotes it to an active drag; a global mouseup
//! resolves the drop against the last hovered spot.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Where a dragged item would land: a container plus an insertion index
/// into that container's rendered sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct DropSpot<C> {
    pub container: C,
    pub index: usize,
}

/// DnD state signals, generic over the dragged-item id and the
/// container key.
pub struct DragSignals<T, C>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    pub dragging_read: ReadSignal<Option<T>>,
    pub dragging_write: WriteSignal<Option<T>>,
    pub drop_spot_read: ReadSignal<Option<DropSpot<C>>>,
    pub drop_spot_write: WriteSignal<Option<DropSpot<C>>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item id (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<T>>,
    pub pending_write: WriteSignal<Option<T>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

impl<T, C> Clone for DragSignals<T, C>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, C> Copy for DragSignals<T, C>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_drag_signals<T, C>() -> DragSignals<T, C>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    let (dragging_read, dragging_write) = signal(None::<T>);
    let (drop_spot_read, drop_spot_write) = signal(None::<DropSpot<C>>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<T>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DragSignals {
        dragging_read,
        dragging_write,
        drop_spot_read,
        drop_spot_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// Insertion index for a pointer at `pointer_y` over a container whose
/// non-dragged siblings have the given vertical midpoints, in rendered
/// (top to bottom) order. The item lands before the first sibling whose
/// midpoint sits below the pointer; past the last midpoint it lands at
/// the end. An empty container always yields index 0.
pub fn insertion_index(pointer_y: f64, sibling_midpoints: &[f64]) -> usize {
    sibling_midpoints
        .iter()
        .position(|mid| pointer_y < *mid)
        .unwrap_or(sibling_midpoints.len())
}

/// End drag operation
pub fn end_drag<T, C>(dnd: &DragSignals<T, C>)
where
    T: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    dnd.dragging_write.set(None);
    dnd.drop_spot_write.set(None);
    dnd.pending_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            100,
        );
        cb.forget();
    }
}

/// Create mousedown handler for draggable items.
/// Records pending drag with start position.
pub fn make_on_mousedown<T, C>(
    dnd: DragSignals<T, C>,
    item: T,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    T: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                    return;
                }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                    return;
                }
            }
            dnd.pending_write.set(Some(item.clone()));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
fn bind_global_mousemove<T, C>(dnd: DragSignals<T, C>)
where
    T: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(
        move |ev: web_sys::MouseEvent| {
            let pending = dnd.pending_read.get_untracked();

            // If we have a pending drag and haven't started dragging yet
            if pending.is_some() && dnd.dragging_read.get_untracked().is_none() {
                let start_x = dnd.start_x_read.get_untracked();
                let start_y = dnd.start_y_read.get_untracked();
                let dx = (ev.client_x() - start_x).abs();
                let dy = (ev.client_y() - start_y).abs();

                if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                    dnd.dragging_write.set(pending);
                }
            }
        },
    );

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc
                .add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup<T, C, F>(dnd: DragSignals<T, C>, on_drop: F)
where
    T: Clone + PartialEq + Send + Sync + 'static,
    C: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(T, DropSpot<C>) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(
        move |_ev: web_sys::MouseEvent| {
            let dragging = dnd.dragging_read.get_untracked();
            let drop_spot = dnd.drop_spot_read.get_untracked();

            // Clear pending state first
            dnd.pending_write.set(None);

            // If we were actually dragging (not just clicking)
            if let (Some(dragged), Some(spot)) = (dragging, drop_spot) {
                end_drag(&dnd);
                on_drop(dragged, spot);
            } else {
                // Plain click: clear any leftovers without raising the
                // just-ended flag, so the click itself still lands.
                dnd.dragging_write.set(None);
                dnd.drop_spot_write.set(None);
            }
        },
    );

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc
                .add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::insertion_index;

    #[test]
    fn empty_container_inserts_at_zero() {
        assert_eq!(insertion_index(120.0, &[]), 0);
    }

    #[test]
    fn pointer_above_all_midpoints_inserts_first() {
        assert_eq!(insertion_index(10.0, &[40.0, 80.0, 120.0]), 0);
    }

    #[test]
    fn pointer_between_midpoints_inserts_between() {
        assert_eq!(insertion_index(60.0, &[40.0, 80.0, 120.0]), 1);
        assert_eq!(insertion_index(100.0, &[40.0, 80.0, 120.0]), 2);
    }

    #[test]
    fn pointer_below_all_midpoints_appends() {
        assert_eq!(insertion_index(500.0, &[40.0, 80.0, 120.0]), 3);
    }

    #[test]
    fn pointer_exactly_on_midpoint_goes_after() {
        // `pointer_y < mid` is strict: sitting on the midpoint lands after it.
        assert_eq!(insertion_index(80.0, &[40.0, 80.0, 120.0]), 2);
    }
}
