//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `Task` - The task list data
//! - `ModalStack` - Modal overlay management

pub mod modal;
pub mod task;

// Re-export commonly used types
pub use modal::{Modal, ModalStack};
pub use task::Task;
