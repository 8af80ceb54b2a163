//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod help_dialog;
pub mod layout;
pub mod swipe_row;
pub mod task_list;

pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use swipe_row::{SwipeAction, SwipeRow};
pub use task_list::{RowCommand, TaskListComponent};
