//! Modal stack for managing overlays
//!
//! Overlays are tracked as an enum-based stack rather than a pile of
//! boolean flags, so only the top modal ever receives input.

/// Represents a modal overlay that can be displayed on top of the main UI
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Help dialog showing keys and gestures
    Help { scroll_offset: usize },
    /// New task input prompt
    NewTask { input: String },
}

/// A stack of modal overlays
///
/// Modals are rendered from bottom to top, with only the top modal
/// receiving input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push a modal onto the stack
    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    /// Pop the top modal from the stack
    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// Get a reference to the top modal without removing it
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    /// Get a mutable reference to the top modal
    pub fn top_mut(&mut self) -> Option<&mut Modal> {
        self.stack.last_mut()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::Help { scroll_offset: 0 });
        assert!(stack.top().is_some());

        stack.push(Modal::NewTask {
            input: String::new(),
        });

        let top = stack.pop();
        assert_eq!(
            top,
            Some(Modal::NewTask {
                input: String::new()
            })
        );

        let top = stack.pop();
        assert_eq!(top, Some(Modal::Help { scroll_offset: 0 }));
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_modal_stack_top_mut() {
        let mut stack = ModalStack::new();
        stack.push(Modal::NewTask {
            input: String::new(),
        });

        if let Some(Modal::NewTask { input }) = stack.top_mut() {
            input.push('x');
        }

        assert_eq!(
            stack.top(),
            Some(&Modal::NewTask {
                input: "x".to_string()
            })
        );
    }
}
