//! Leptos Pointer Gestures
//!
//! Mouse-driven drag-and-drop reordering and per-row horizontal swipe
//! for Leptos, using global mouse listeners. Uses movement thresholds to
//! distinguish click from drag and scroll from swipe.

pub mod drag;
pub mod swipe;

pub use drag::{
    bind_global_mouseup, create_drag_signals, end_drag, insertion_index, make_on_mousedown,
    DragSignals, DropSpot,
};
pub use swipe::{
    row_offset, transition, viewport_is_desktop, SwipeEffect, SwipeEvent, SwipeState,
    ACTION_THRESHOLD_PX, DESKTOP_BREAKPOINT_PX, MAX_OPEN_PX, VERTICAL_SLOP_PX,
};
