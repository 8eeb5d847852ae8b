//! Task Row
//!
//! One task line: completion checkbox, title, due/priority badges.
//! On desktop manual-list scopes the row arms drag-to-reorder; below
//! the breakpoint it runs the swipe recognizer instead (right to
//! complete, left to confirm delete).

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use leptos_gestures::{
    insertion_index, make_on_mousedown, row_offset, transition, viewport_is_desktop, DropSpot,
    SwipeEffect, SwipeEvent, SwipeState,
};

use crate::app::TaskDrag;
use crate::commands::{self, TaskPatch};
use crate::components::DeleteConfirm;
use crate::context::use_app_context;
use crate::models::Task;
use crate::order::SectionAddr;

/// At most one row shows a swipe action at a time; pressing any row
/// snaps the previously open one shut.
#[derive(Clone, Copy)]
pub struct OpenSwipeRow(pub RwSignal<Option<String>>);

fn priority_badge(priority: u8) -> Option<&'static str> {
    match priority {
        1 => Some("!"),
        2 => Some("!!"),
        3 => Some("!!!"),
        _ => None,
    }
}

#[component]
pub fn TaskRow(
    task: Task,
    /// The container the row can be dropped into; None disables drag.
    drop_addr: Option<SectionAddr>,
    row_index: usize,
    set_editing_task: WriteSignal<Option<Task>>,
) -> impl IntoView {
    let ctx = use_app_context();
    let task_drag = expect_context::<TaskDrag>().0;
    let open_row = expect_context::<OpenSwipeRow>().0;

    let task_id = task.id.clone();
    let completed = task.completed;

    // Swipe recognizer state, one machine per row.
    let swipe = RwSignal::new(SwipeState::Idle);
    let press_origin = RwSignal::new(None::<(f64, f64)>);
    let delete_armed = RwSignal::new(false);

    let toggle_id = task_id.clone();
    let toggle_complete = move || {
        let id = toggle_id.clone();
        spawn_local(async move {
            let patch = TaskPatch {
                completed: Some(!completed),
                ..TaskPatch::default()
            };
            match commands::update_task(&id, &patch).await {
                Ok(_) => ctx.reload(),
                Err(e) => ctx.report_failure("updating task", &e),
            }
        });
    };

    let apply_effect = {
        let toggle_complete = toggle_complete.clone();
        move |effect: SwipeEffect| match effect {
            SwipeEffect::Complete => toggle_complete(),
            SwipeEffect::ConfirmDelete => delete_armed.set(true),
            SwipeEffect::Snap => {}
        }
    };

    // Drag arming (desktop, manual list scope only)
    let drag_arm = drop_addr.clone().map(|_| {
        let arm = make_on_mousedown(task_drag, task_id.clone());
        move |ev: web_sys::MouseEvent| {
            if viewport_is_desktop() {
                arm(ev);
            }
        }
    });

    let swipe_id = task_id.clone();
    let on_mousedown = {
        let drag_arm = drag_arm.clone();
        let apply_effect = apply_effect.clone();
        move |ev: web_sys::MouseEvent| {
            if viewport_is_desktop() {
                if let Some(arm) = &drag_arm {
                    arm(ev);
                }
                return;
            }
            if open_row.get_untracked().as_deref() != Some(swipe_id.as_str()) {
                open_row.set(Some(swipe_id.clone()));
            }
            press_origin.set(Some((f64::from(ev.client_x()), f64::from(ev.client_y()))));
            let (next, effect) = transition(swipe.get_untracked(), SwipeEvent::Press);
            swipe.set(next);
            if let Some(effect) = effect {
                apply_effect(effect);
            }
        }
    };

    let hover_addr = drop_addr.clone();
    let hover_id = task_id.clone();
    let apply_move = apply_effect.clone();
    let on_mousemove = move |ev: web_sys::MouseEvent| {
        // Desktop: report a provisional drop spot while a drag is live.
        if let Some(addr) = &hover_addr {
            if let Some(dragging) = task_drag.dragging_read.get_untracked() {
                if dragging != hover_id {
                    let mid = ev
                        .current_target()
                        .and_then(|t| {
                            t.dyn_ref::<web_sys::Element>()
                                .map(|e| e.get_bounding_client_rect())
                        })
                        .map(|rect| rect.top() + rect.height() / 2.0);
                    let index = match mid {
                        Some(mid) => {
                            row_index + insertion_index(f64::from(ev.client_y()), &[mid])
                        }
                        None => row_index,
                    };
                    task_drag
                        .drop_spot_write
                        .set(Some(DropSpot {
                            container: addr.clone(),
                            index,
                        }));
                }
                return;
            }
        }
        // Mobile: feed the recognizer.
        if let Some((ox, oy)) = press_origin.get_untracked() {
            let dx = f64::from(ev.client_x()) - ox;
            let dy = f64::from(ev.client_y()) - oy;
            let (next, effect) = transition(swipe.get_untracked(), SwipeEvent::Move { dx, dy });
            swipe.set(next);
            if let Some(effect) = effect {
                apply_move(effect);
            }
        }
    };

    let apply_up = apply_effect.clone();
    let on_mouseup = move |_| {
        if press_origin.get_untracked().is_some() {
            press_origin.set(None);
            let (next, effect) = transition(swipe.get_untracked(), SwipeEvent::Release);
            swipe.set(next);
            if let Some(effect) = effect {
                apply_up(effect);
            }
        }
    };

    let apply_cancel = apply_effect.clone();
    let on_mouseleave = move |_| {
        if press_origin.get_untracked().is_some() {
            press_origin.set(None);
            let (next, effect) = transition(swipe.get_untracked(), SwipeEvent::Cancel);
            swipe.set(next);
            if let Some(effect) = effect {
                apply_cancel(effect);
            }
        }
    };

    // Another row opening snaps this one back to neutral.
    let snap_id = task_id.clone();
    Effect::new(move |_| {
        let open = open_row.get();
        if open.as_deref() != Some(snap_id.as_str())
            && swipe.get_untracked() != SwipeState::Idle
        {
            swipe.set(SwipeState::Reset);
            press_origin.set(None);
        }
    });

    let row_style = move || {
        let dx = row_offset(&swipe.get());
        if dx == 0.0 {
            String::new()
        } else {
            format!("transform: translateX({dx}px)")
        }
    };

    let edit_task = task.clone();
    let open_editor = move |_| {
        if !task_drag.drag_just_ended_read.get_untracked() {
            set_editing_task.set(Some(edit_task.clone()));
        }
    };

    let checkbox_toggle = toggle_complete.clone();
    let delete_id = task_id.clone();
    let due = task.due_date;
    let tags = task.tags.clone();
    let dragging_class = {
        let id = task_id.clone();
        move || {
            if task_drag.dragging_read.get() == Some(id.clone()) {
                "task-row dragging"
            } else if completed {
                "task-row done"
            } else {
                "task-row"
            }
        }
    };

    view! {
        <div
            class=dragging_class
            style=row_style
            on:mousedown=on_mousedown
            on:mousemove=on_mousemove
            on:mouseup=on_mouseup
            on:mouseleave=on_mouseleave
        >
            <input
                type="checkbox"
                prop:checked=completed
                on:change=move |_| checkbox_toggle()
            />
            <span class="task-title" on:click=open_editor>
                {task.title.clone()}
            </span>
            {priority_badge(task.priority)
                .map(|p| view! { <span class="priority-badge">{p}</span> })}
            {due.map(|d| view! { <span class="due-badge">{d.format("%b %-d").to_string()}</span> })}
            {(!tags.is_empty())
                .then(|| {
                    tags.iter()
                        .map(|t| view! { <span class="tag-chip">{t.clone()}</span> })
                        .collect_view()
                })}
            <DeleteConfirm
                button_class="delete-btn"
                armed=delete_armed
                on_confirm=Callback::new(move |_| {
                    let id = delete_id.clone();
                    spawn_local(async move {
                        match commands::delete_task(&id).await {
                            Ok(()) => ctx.reload(),
                            Err(e) => ctx.report_failure("deleting task", &e),
                        }
                    });
                })
            />
        </div>
    }
}
