//! UI Components
//!
//! Thin component layer over the engine: every store operation and
//! command is reachable from a handler here.

mod calendar_view;
mod delete_confirm;
mod sidebar;
mod task_composer;
mod task_editor;
mod task_list;
mod task_row;

pub use calendar_view::CalendarView;
pub use delete_confirm::DeleteConfirm;
pub use sidebar::Sidebar;
pub use task_composer::TaskComposer;
pub use task_editor::TaskEditor;
pub use task_list::TaskListView;
pub use task_row::{OpenSwipeRow, TaskRow};
