//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for animations/updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit the application
    Quit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move to next task
    NextItem,
    /// Move to previous task
    PrevItem,
    /// Jump to first task
    FirstItem,
    /// Jump to last task
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Tasks
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle the done flag of the selected task
    ToggleDone,
    /// Force-close any row with a revealed action surface
    CloseOpenRows,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open help dialog showing keys and gestures
    OpenHelp,
    /// Open the new task prompt
    OpenNewTask,
    /// Close the current modal
    CloseModal,
    /// Create a task with the given title
    SubmitNewTask(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::Quit => write!(f, "Quit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::ToggleDone => write!(f, "ToggleDone"),
            Action::CloseOpenRows => write!(f, "CloseOpenRows"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenNewTask => write!(f, "OpenNewTask"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::SubmitNewTask(title) => write!(f, "SubmitNewTask({})", title),
        }
    }
}
