//! Tactile-style confirmation for committed actions
//!
//! The swipe rows fire a short feedback pulse when an action commits.
//! The emitter is injected rather than called directly so tests can record
//! the exact ordering of pulses relative to action callbacks.

use std::io::Write;

/// A sink for commit-confirmation pulses.
///
/// Emitters are fire-and-forget: a pulse carries no payload and reports no
/// outcome to the caller.
pub trait FeedbackEmitter {
    /// Emit one confirmation pulse.
    fn tap(&self);
}

/// Rings the terminal bell (BEL) for each pulse.
pub struct TerminalBell;

impl FeedbackEmitter for TerminalBell {
    fn tap(&self) {
        let mut stdout = std::io::stdout();
        if stdout.write_all(b"\x07").and_then(|_| stdout.flush()).is_err() {
            tracing::trace!("bell write failed");
        }
    }
}

/// Swallows pulses. Used when the bell is disabled in config.
pub struct Silent;

impl FeedbackEmitter for Silent {
    fn tap(&self) {}
}
