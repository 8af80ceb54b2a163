//! Swipeable action row
//!
//! A list row that reveals directional actions under horizontal mouse drags.
//! Dragging right uncovers a non-destructive "complete" surface at the left
//! edge; dragging left uncovers a destructive "delete" surface at the right
//! edge. Only one surface can be visible at a time.
//!
//! The two directions commit differently. Releasing a rightward drag past
//! the activation threshold commits immediately and the row closes after a
//! short beat. A leftward drag past threshold only reveals the surface; the
//! row rests open until the surface itself is tapped, at which point the
//! action fires and a busy indicator is shown for a settle delay before the
//! row closes. Releasing below threshold springs back with no side effects.
//!
//! Rows never observe whether the host handled a committed action; they
//! invoke the callback and close.

use crate::feedback::{FeedbackEmitter, Silent};
use crate::gesture::{self, REVEAL_DISTANCE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::{Duration, Instant};
use tracing::debug;
use unicode_width::UnicodeWidthChar;

/// Pause after a rightward (complete) commit before the row starts closing,
/// so the commit visually registers.
pub const COMPLETE_CLOSE_DELAY: Duration = Duration::from_millis(10);

/// How long the busy indicator stays up after a delete is confirmed before
/// the row closes.
pub const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Surface scale below which the label is dropped and the icon dimmed.
const LABEL_SCALE: f32 = 0.75;

/// Busy indicator frames shown on the destructive surface while pending.
const BUSY_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

// ═══════════════════════════════════════════════════════════════════════════════
// Action Descriptors
// ═══════════════════════════════════════════════════════════════════════════════

/// Visual descriptor for one directional action surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeAction {
    pub icon: String,
    pub label: Option<String>,
    pub fg: Color,
    pub bg: Color,
}

impl SwipeAction {
    pub fn new(icon: &str, fg: Color, bg: Color) -> Self {
        Self {
            icon: icon.to_string(),
            label: None,
            fg,
            bg,
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Preset look for the non-destructive complete affordance.
    pub fn complete() -> Self {
        Self::new("✓", Color::White, Color::Green).with_label("Done")
    }

    /// Preset look for the destructive delete affordance.
    pub fn delete() -> Self {
        Self::new("✗", Color::White, Color::Red).with_label("Delete")
    }
}

/// Lifecycle of a commit on a swipe row.
///
/// The destructive path runs Idle → Pending → Closing → Idle. The complete
/// path has no busy phase and goes Idle → Closing → Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitPhase {
    /// At rest, mid-drag, or resting open awaiting a confirmation tap.
    Idle,
    /// Delete confirmed; busy indicator shown until the settle delay expires.
    Pending,
    /// A commit happened and the row is waiting out its delay or springing
    /// shut.
    Closing,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Row State
// ═══════════════════════════════════════════════════════════════════════════════

type ActionCallback = Box<dyn FnMut()>;

/// One configurable direction: its look plus the host callback.
/// The direction participates in gestures only while a callback is present.
struct Direction {
    action: SwipeAction,
    on_commit: Option<ActionCallback>,
}

impl Direction {
    fn enabled(&self) -> bool {
        self.on_commit.is_some()
    }
}

/// An in-progress press, from mouse down to mouse up.
struct Grab {
    origin_col: u16,
    origin_offset: f32,
    /// Set once travel exceeds the tap slop; distinguishes drags from taps.
    moved: bool,
    /// The press landed on the open destructive surface.
    on_surface: bool,
}

/// Gesture and animation state. Allocated only for interactive rows;
/// disabled rows carry none of this.
struct Interactive {
    /// Signed row offset in gesture units. Positive reveals the complete
    /// surface on the left, negative the delete surface on the right, so at
    /// most one side is ever visible.
    offset: f32,
    /// Spring target the offset settles toward when not grabbed.
    target: f32,
    grab: Option<Grab>,
    phase: CommitPhase,
    /// Deadline for the scheduled close after a commit. Checked on tick and
    /// dropped with the row, so a close never fires for a pruned row.
    close_at: Option<Instant>,
    busy_frame: usize,
    leading: Direction,
    trailing: Direction,
    feedback: Box<dyn FeedbackEmitter>,
}

/// A swipeable list row. See the module docs for the gesture contract.
pub struct SwipeRow {
    interactive: Option<Interactive>,
}

impl Default for SwipeRow {
    fn default() -> Self {
        Self::new()
    }
}

impl SwipeRow {
    /// An interactive row with no directions enabled yet. Enable them by
    /// supplying callbacks via [`Self::on_leading`] / [`Self::on_trailing`].
    pub fn new() -> Self {
        Self {
            interactive: Some(Interactive {
                offset: 0.0,
                target: 0.0,
                grab: None,
                phase: CommitPhase::Idle,
                close_at: None,
                busy_frame: 0,
                leading: Direction {
                    action: SwipeAction::complete(),
                    on_commit: None,
                },
                trailing: Direction {
                    action: SwipeAction::delete(),
                    on_commit: None,
                },
                feedback: Box::new(Silent),
            }),
        }
    }

    /// A static row: renders content only, attaches no gesture state, and
    /// never invokes a callback. Builders have no effect on it.
    pub fn disabled() -> Self {
        Self { interactive: None }
    }

    /// Enable the rightward-drag complete direction.
    pub fn on_leading(mut self, callback: impl FnMut() + 'static) -> Self {
        if let Some(s) = &mut self.interactive {
            s.leading.on_commit = Some(Box::new(callback));
        }
        self
    }

    /// Enable the leftward-drag delete direction.
    pub fn on_trailing(mut self, callback: impl FnMut() + 'static) -> Self {
        if let Some(s) = &mut self.interactive {
            s.trailing.on_commit = Some(Box::new(callback));
        }
        self
    }

    /// Replace the preset look of the complete surface.
    pub fn leading_action(mut self, action: SwipeAction) -> Self {
        if let Some(s) = &mut self.interactive {
            s.leading.action = action;
        }
        self
    }

    /// Replace the preset look of the delete surface.
    pub fn trailing_action(mut self, action: SwipeAction) -> Self {
        if let Some(s) = &mut self.interactive {
            s.trailing.action = action;
        }
        self
    }

    pub fn with_feedback(mut self, feedback: Box<dyn FeedbackEmitter>) -> Self {
        if let Some(s) = &mut self.interactive {
            s.feedback = feedback;
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // State queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn is_disabled(&self) -> bool {
        self.interactive.is_none()
    }

    /// Signed offset in gesture units.
    pub fn offset(&self) -> f32 {
        self.interactive.as_ref().map_or(0.0, |s| s.offset)
    }

    pub fn phase(&self) -> CommitPhase {
        self.interactive
            .as_ref()
            .map_or(CommitPhase::Idle, |s| s.phase)
    }

    /// True while the busy indicator is up.
    pub fn is_busy(&self) -> bool {
        self.phase() == CommitPhase::Pending
    }

    /// True when the row is fully closed with nothing in flight.
    pub fn is_at_rest(&self) -> bool {
        self.interactive.as_ref().map_or(true, |s| {
            s.offset == 0.0
                && s.target == 0.0
                && s.grab.is_none()
                && s.close_at.is_none()
                && s.phase == CommitPhase::Idle
        })
    }

    /// True when the delete surface is fully revealed and awaiting its
    /// confirmation tap.
    pub fn is_resting_open(&self) -> bool {
        self.interactive.as_ref().map_or(false, |s| {
            s.target == -REVEAL_DISTANCE && s.grab.is_none() && s.phase == CommitPhase::Idle
        })
    }

    /// Content scale of whichever surface is revealed, derived from the
    /// current offset.
    pub fn reveal_scale(&self) -> f32 {
        gesture::surface_scale(self.offset())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────────

    /// Begin a press at the given terminal column. `area` is the rect the
    /// row was last drawn into, used to hit-test the open surface.
    pub fn mouse_down(&mut self, col: u16, area: Rect) {
        let Some(s) = &mut self.interactive else {
            return;
        };
        // A commit in flight owns the row until it finishes closing.
        if s.phase != CommitPhase::Idle {
            return;
        }
        let on_surface = s.target == -REVEAL_DISTANCE
            && trailing_surface_rect(area, s.offset)
                .map_or(false, |r| col >= r.x && col < r.x + r.width);
        s.grab = Some(Grab {
            origin_col: col,
            origin_offset: s.offset,
            moved: false,
            on_surface,
        });
    }

    /// Track pointer motion while pressed. Columns may lie outside the row's
    /// rect; capture follows the pointer until release.
    pub fn mouse_drag(&mut self, col: u16) {
        let Some(s) = &mut self.interactive else {
            return;
        };
        let Some(g) = &mut s.grab else {
            return;
        };
        let origin = g.origin_offset;
        let delta = gesture::drag_units(col as i32 - g.origin_col as i32);
        if delta.abs() > gesture::TAP_SLOP {
            g.moved = true;
        }
        // Drags toward a direction without a callback have no travel at all.
        let floor = if s.trailing.enabled() {
            -REVEAL_DISTANCE
        } else {
            0.0
        };
        let ceil = if s.leading.enabled() {
            REVEAL_DISTANCE
        } else {
            0.0
        };
        s.offset = (origin + delta).clamp(floor, ceil);
    }

    /// Release the press: commit, open, close, or spring back depending on
    /// where the gesture ended.
    pub fn mouse_up(&mut self, now: Instant) {
        let Some(s) = &mut self.interactive else {
            return;
        };
        let Some(grab) = s.grab.take() else {
            return;
        };

        if !grab.moved {
            // A tap. Only meaningful on a row resting open: on the surface
            // it confirms the delete, on the content it closes the row.
            if s.target == -REVEAL_DISTANCE {
                if grab.on_surface {
                    s.confirm_trailing(now);
                } else {
                    s.target = 0.0;
                }
            }
            return;
        }

        if !gesture::past_threshold(s.offset) {
            s.target = 0.0;
        } else if s.offset > 0.0 {
            s.commit_leading(now);
        } else {
            // Reveal only; the delete commits on a later tap.
            s.target = -REVEAL_DISTANCE;
            debug!(offset = s.offset, "delete surface opened");
        }
    }

    /// Advance animations and fire any due scheduled close.
    pub fn tick(&mut self, now: Instant) {
        let Some(s) = &mut self.interactive else {
            return;
        };
        if s.phase == CommitPhase::Pending {
            s.busy_frame = s.busy_frame.wrapping_add(1);
        }
        if let Some(at) = s.close_at {
            if now >= at {
                s.close_at = None;
                s.phase = CommitPhase::Closing;
                s.target = 0.0;
            }
        }
        if s.grab.is_none() && s.offset != s.target {
            s.offset = gesture::spring_step(s.offset, s.target);
        }
        if s.phase == CommitPhase::Closing && s.offset == 0.0 && s.close_at.is_none() {
            s.phase = CommitPhase::Idle;
        }
    }

    /// Force-close the row outside the gesture flow. Cancels any grab and
    /// scheduled close; invokes nothing.
    pub fn close(&mut self) {
        let Some(s) = &mut self.interactive else {
            return;
        };
        s.grab = None;
        s.close_at = None;
        if s.phase == CommitPhase::Pending {
            s.phase = CommitPhase::Closing;
        }
        s.target = 0.0;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the row: content slid by the current offset, with the revealed
    /// surface underneath. Content is supplied by the host each frame and
    /// rendered as-is.
    pub fn draw(&self, frame: &mut Frame, area: Rect, content: Line) {
        let Some(s) = &self.interactive else {
            frame.render_widget(Paragraph::new(content), area);
            return;
        };
        let cells = gesture::offset_cells(s.offset);
        if cells == 0 {
            frame.render_widget(Paragraph::new(content), area);
            return;
        }
        let scale = gesture::surface_scale(s.offset);

        if cells > 0 {
            // Complete surface at the left edge; content slides right and
            // clips at the row's right edge.
            let width = (cells as u16).min(area.width);
            let surface = Rect::new(area.x, area.y, width, area.height);
            let rest = Rect::new(area.x + width, area.y, area.width - width, area.height);
            render_surface(frame, surface, &s.leading.action, scale, None);
            frame.render_widget(Paragraph::new(content), rest);
        } else {
            // Delete surface at the right edge; content slides left, its
            // leading columns disappearing past the row's left edge.
            let width = (-cells as u16).min(area.width);
            let surface = Rect::new(area.x + area.width - width, area.y, width, area.height);
            let rest = Rect::new(area.x, area.y, area.width - width, area.height);
            let busy = (s.phase == CommitPhase::Pending).then_some(s.busy_frame);
            render_surface(frame, surface, &s.trailing.action, scale, busy);
            frame.render_widget(Paragraph::new(trim_line_head(content, width)), rest);
        }
    }
}

impl Interactive {
    /// Rightward release past threshold: feedback, callback, then close
    /// after a beat. The feedback pulse always precedes the callback.
    fn commit_leading(&mut self, now: Instant) {
        self.feedback.tap();
        if let Some(callback) = self.leading.on_commit.as_mut() {
            callback();
        }
        self.phase = CommitPhase::Closing;
        self.target = REVEAL_DISTANCE;
        self.close_at = Some(now + COMPLETE_CLOSE_DELAY);
        debug!("complete action committed");
    }

    /// Tap on the open delete surface: feedback, busy phase, callback, then
    /// close once the settle delay expires.
    fn confirm_trailing(&mut self, now: Instant) {
        self.feedback.tap();
        self.phase = CommitPhase::Pending;
        self.busy_frame = 0;
        if let Some(callback) = self.trailing.on_commit.as_mut() {
            callback();
        }
        self.close_at = Some(now + SETTLE_DELAY);
        debug!("delete action confirmed");
    }
}

/// Rect of the revealed delete surface within the row, if any.
fn trailing_surface_rect(area: Rect, offset: f32) -> Option<Rect> {
    let cells = gesture::offset_cells(offset);
    if cells >= 0 {
        return None;
    }
    let width = (-cells as u16).min(area.width);
    Some(Rect::new(
        area.x + area.width - width,
        area.y,
        width,
        area.height,
    ))
}

/// Paint one action surface. Scale maps to emphasis in cell space: the label
/// appears from `LABEL_SCALE` upward and the text turns bold at full reveal.
/// While busy, a spinner frame replaces the icon and label.
fn render_surface(frame: &mut Frame, area: Rect, action: &SwipeAction, scale: f32, busy: Option<usize>) {
    let mut style = Style::default().fg(action.fg).bg(action.bg);
    if scale >= 1.0 {
        style = style.add_modifier(Modifier::BOLD);
    } else if scale < LABEL_SCALE {
        style = style.add_modifier(Modifier::DIM);
    }

    let text = match busy {
        Some(frame_idx) => BUSY_FRAMES[frame_idx % BUSY_FRAMES.len()].to_string(),
        None => match &action.label {
            Some(label) if scale >= LABEL_SCALE => format!("{} {}", action.icon, label),
            _ => action.icon.clone(),
        },
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(text, style)))
        .alignment(Alignment::Center)
        .style(Style::default().bg(action.bg));
    frame.render_widget(paragraph, area);
}

/// Drop the first `skip` display columns from a line, padding with a space
/// when the cut lands inside a wide character.
fn trim_line_head(line: Line<'_>, skip: u16) -> Line<'_> {
    let mut remaining = skip as usize;
    let mut spans = Vec::with_capacity(line.spans.len());
    for span in line.spans {
        if remaining == 0 {
            spans.push(span);
            continue;
        }
        let width = span.width();
        if width <= remaining {
            remaining -= width;
            continue;
        }
        let mut taken = 0;
        let mut kept = String::new();
        for ch in span.content.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if taken < remaining {
                taken += ch_width;
                if taken > remaining {
                    kept.push(' ');
                }
            } else {
                kept.push(ch);
            }
        }
        remaining = 0;
        spans.push(Span::styled(kept, span.style));
    }
    Line::from(spans)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::ACTIVATION_THRESHOLD;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::cell::RefCell;
    use std::rc::Rc;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 40,
        height: 1,
    };

    /// Shared log capturing feedback pulses and action callbacks in the
    /// order they fire.
    #[derive(Clone, Default)]
    struct EventLog(Rc<RefCell<Vec<&'static str>>>);

    impl EventLog {
        fn push(&self, event: &'static str) {
            self.0.borrow_mut().push(event);
        }

        fn events(&self) -> Vec<&'static str> {
            self.0.borrow().clone()
        }

        fn count(&self, event: &str) -> usize {
            self.0.borrow().iter().filter(|e| **e == event).count()
        }
    }

    impl FeedbackEmitter for EventLog {
        fn tap(&self) {
            self.push("feedback");
        }
    }

    /// Row with both directions wired to the log.
    fn test_row(log: &EventLog) -> SwipeRow {
        let complete = log.clone();
        let delete = log.clone();
        SwipeRow::new()
            .with_feedback(Box::new(log.clone()))
            .on_leading(move || complete.push("complete"))
            .on_trailing(move || delete.push("delete"))
    }

    /// Press at the row center and drag by `cells` columns. Columns clamp at
    /// the screen edge the way a real terminal reports them.
    fn press_and_drag(row: &mut SwipeRow, cells: i32) {
        let start: i32 = 20;
        row.mouse_down(start as u16, AREA);
        row.mouse_drag((start + cells).max(0) as u16);
    }

    fn drag_and_release(row: &mut SwipeRow, cells: i32, now: Instant) {
        press_and_drag(row, cells);
        row.mouse_up(now);
    }

    /// Run ticks at a 33ms cadence starting just after `from`.
    fn run_ticks(row: &mut SwipeRow, from: Instant, count: u64) {
        for i in 1..=count {
            row.tick(from + Duration::from_millis(i * 33));
        }
    }

    fn tap_at(row: &mut SwipeRow, col: u16, now: Instant) {
        row.mouse_down(col, AREA);
        row.mouse_up(now);
    }

    fn render_to_string(row: &SwipeRow, content: &str) -> (String, Vec<Color>) {
        let backend = TestBackend::new(AREA.width, AREA.height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| row.draw(frame, AREA, Line::from(content.to_string())))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text = buffer.content.iter().map(|c| c.symbol()).collect();
        let bgs = buffer.content.iter().map(|c| c.bg).collect();
        (text, bgs)
    }

    #[test]
    fn test_release_below_threshold_reverts_without_commit() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        drag_and_release(&mut row, 5, t0);
        assert!(log.events().is_empty());

        run_ticks(&mut row, t0, 15);
        assert_eq!(row.offset(), 0.0);
        assert_eq!(row.phase(), CommitPhase::Idle);
        assert!(row.is_at_rest());
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_leading_release_commits_once_and_closes() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        drag_and_release(&mut row, 7, t0);
        // Feedback precedes the callback, and the commit is immediate.
        assert_eq!(log.events(), vec!["feedback", "complete"]);
        assert_eq!(row.phase(), CommitPhase::Closing);

        // Before the close delay the row holds its reveal.
        row.tick(t0 + Duration::from_millis(5));
        assert_eq!(row.phase(), CommitPhase::Closing);
        assert!(row.offset() > 0.0);

        run_ticks(&mut row, t0 + Duration::from_millis(10), 15);
        assert!(row.is_at_rest());
        assert_eq!(row.phase(), CommitPhase::Idle);
        assert_eq!(log.count("complete"), 1);
    }

    #[test]
    fn test_release_exactly_at_threshold_commits() {
        let log = EventLog::default();
        let mut row = test_row(&log);

        drag_and_release(&mut row, 6, Instant::now());
        assert_eq!(log.count("complete"), 1);
    }

    #[test]
    fn test_trailing_release_opens_without_commit() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        drag_and_release(&mut row, -8, t0);
        assert!(log.events().is_empty());

        run_ticks(&mut row, t0, 15);
        assert!(row.is_resting_open());
        assert_eq!(row.offset(), -REVEAL_DISTANCE);
        assert_eq!(row.reveal_scale(), 1.0);
        assert_eq!(row.phase(), CommitPhase::Idle);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_open_then_tap_confirms_delete_end_to_end() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        // Drag 80 units left and release: revealed at full scale, no commit.
        drag_and_release(&mut row, -8, t0);
        run_ticks(&mut row, t0, 15);
        assert!(row.is_resting_open());
        assert_eq!(row.reveal_scale(), 1.0);
        assert!(log.events().is_empty());

        // Tap the surface (rightmost ten columns): feedback, then callback,
        // then the busy phase.
        let t1 = t0 + Duration::from_millis(600);
        tap_at(&mut row, 35, t1);
        assert_eq!(log.events(), vec!["feedback", "delete"]);
        assert_eq!(row.phase(), CommitPhase::Pending);
        assert!(row.is_busy());

        // A second tap while pending does nothing.
        tap_at(&mut row, 35, t1 + Duration::from_millis(50));
        assert_eq!(log.count("delete"), 1);
        assert_eq!(log.count("feedback"), 1);

        // Still pending just before the settle delay expires.
        row.tick(t1 + Duration::from_millis(299));
        assert_eq!(row.phase(), CommitPhase::Pending);

        // After the settle delay the row closes and fully resets.
        run_ticks(&mut row, t1 + Duration::from_millis(300), 15);
        assert!(row.is_at_rest());
        assert_eq!(row.phase(), CommitPhase::Idle);
        assert!(!row.is_busy());
        assert_eq!(log.count("delete"), 1);
    }

    #[test]
    fn test_tap_on_content_closes_open_row_without_commit() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        drag_and_release(&mut row, -8, t0);
        run_ticks(&mut row, t0, 15);
        assert!(row.is_resting_open());

        tap_at(&mut row, 5, t0 + Duration::from_millis(600));
        run_ticks(&mut row, t0 + Duration::from_millis(600), 15);
        assert!(row.is_at_rest());
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_drag_ignored_while_pending() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        drag_and_release(&mut row, -8, t0);
        run_ticks(&mut row, t0, 15);
        tap_at(&mut row, 35, t0 + Duration::from_millis(600));
        assert!(row.is_busy());

        press_and_drag(&mut row, -5);
        assert_eq!(row.offset(), -REVEAL_DISTANCE);
        row.mouse_up(t0 + Duration::from_millis(700));
        assert_eq!(log.count("delete"), 1);
    }

    #[test]
    fn test_new_grab_ignored_while_closing() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        drag_and_release(&mut row, 7, t0);
        assert_eq!(row.phase(), CommitPhase::Closing);

        // A second gesture inside the close window must not re-commit.
        drag_and_release(&mut row, 7, t0 + Duration::from_millis(2));
        assert_eq!(log.count("complete"), 1);

        // Once fully closed the row accepts gestures again.
        run_ticks(&mut row, t0 + Duration::from_millis(10), 15);
        assert!(row.is_at_rest());
        drag_and_release(&mut row, 7, t0 + Duration::from_millis(900));
        assert_eq!(log.count("complete"), 2);
    }

    #[test]
    fn test_overdrag_clamps_at_full_reveal() {
        let log = EventLog::default();
        let mut row = test_row(&log);

        press_and_drag(&mut row, -25);
        assert_eq!(row.offset(), -REVEAL_DISTANCE);
        assert_eq!(row.reveal_scale(), 1.0);

        let mut row = test_row(&log);
        press_and_drag(&mut row, 25);
        assert_eq!(row.offset(), REVEAL_DISTANCE);
        assert_eq!(row.reveal_scale(), 1.0);
    }

    #[test]
    fn test_disabled_row_is_inert() {
        let log = EventLog::default();
        let complete = log.clone();
        let mut row = SwipeRow::disabled()
            .on_leading(move || complete.push("complete"))
            .with_feedback(Box::new(log.clone()));
        assert!(row.is_disabled());

        drag_and_release(&mut row, 10, Instant::now());
        tap_at(&mut row, 35, Instant::now());
        run_ticks(&mut row, Instant::now(), 5);
        assert_eq!(row.offset(), 0.0);
        assert_eq!(row.phase(), CommitPhase::Idle);
        assert!(log.events().is_empty());

        let (text, bgs) = render_to_string(&row, "water the plants");
        assert!(text.contains("water the plants"));
        assert!(!bgs.contains(&Color::Green));
        assert!(!bgs.contains(&Color::Red));
    }

    #[test]
    fn test_omitted_direction_has_no_travel_or_surface() {
        let log = EventLog::default();
        let delete = log.clone();
        let mut row = SwipeRow::new()
            .with_feedback(Box::new(log.clone()))
            .on_trailing(move || delete.push("delete"));

        // No leading callback: rightward drags have no travel and render no
        // surface, and release reverts cleanly.
        press_and_drag(&mut row, 10);
        assert_eq!(row.offset(), 0.0);
        let (_, bgs) = render_to_string(&row, "task");
        assert!(!bgs.contains(&Color::Green));
        row.mouse_up(Instant::now());
        assert!(log.events().is_empty());
        assert!(row.is_at_rest());

        // The enabled direction still works.
        drag_and_release(&mut row, -8, Instant::now());
        assert!(row.offset() <= -ACTIVATION_THRESHOLD);
    }

    #[test]
    fn test_close_escape_hatch() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        drag_and_release(&mut row, -8, t0);
        run_ticks(&mut row, t0, 15);
        assert!(row.is_resting_open());

        row.close();
        run_ticks(&mut row, t0 + Duration::from_millis(600), 15);
        assert!(row.is_at_rest());
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_open_surface_renders_label_and_busy_indicator_replaces_it() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        drag_and_release(&mut row, -8, t0);
        run_ticks(&mut row, t0, 15);
        let (text, bgs) = render_to_string(&row, "buy milk");
        assert!(text.contains("Delete"));
        assert!(bgs.contains(&Color::Red));

        tap_at(&mut row, 35, t0 + Duration::from_millis(600));
        let (text, bgs) = render_to_string(&row, "buy milk");
        assert!(!text.contains("Delete"));
        assert!(bgs.contains(&Color::Red));
        assert!(BUSY_FRAMES.iter().any(|f| text.contains(f)));
    }

    #[test]
    fn test_content_slides_left_under_trailing_reveal() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        drag_and_release(&mut row, -8, t0);
        run_ticks(&mut row, t0, 15);

        // Ten columns of reveal shift the content ten cells left, clipping
        // its head.
        let (text, _) = render_to_string(&row, "0123456789abcdefghij");
        assert!(!text.contains("0123456789a"));
        assert!(text.contains("abcdefghij"));
    }

    #[test]
    fn test_trailing_action_override_replaces_preset_surface() {
        let log = EventLog::default();
        let archive = log.clone();
        let mut row = SwipeRow::new()
            .trailing_action(
                SwipeAction::new("▤", Color::White, Color::Magenta).with_label("Archive"),
            )
            .on_trailing(move || archive.push("archive"));
        let t0 = Instant::now();

        drag_and_release(&mut row, -8, t0);
        run_ticks(&mut row, t0, 15);
        assert!(row.is_resting_open());

        let (text, bgs) = render_to_string(&row, "old notes");
        assert!(text.contains("Archive"));
        assert!(!text.contains("Delete"));
        assert!(bgs.contains(&Color::Magenta));
        assert!(!bgs.contains(&Color::Red));

        tap_at(&mut row, 35, t0 + Duration::from_millis(600));
        assert_eq!(log.count("archive"), 1);
    }

    #[test]
    fn test_only_one_surface_renders_at_a_time() {
        let log = EventLog::default();
        let mut row = test_row(&log);
        let t0 = Instant::now();

        // Resting open on the delete side: no complete-surface cell anywhere.
        drag_and_release(&mut row, -8, t0);
        run_ticks(&mut row, t0, 15);
        let (text, bgs) = render_to_string(&row, "buy milk");
        assert!(bgs.contains(&Color::Red));
        assert!(!bgs.contains(&Color::Green));
        assert!(!text.contains("Done"));

        // Mirrored mid-drag on the complete side.
        let mut row = test_row(&log);
        press_and_drag(&mut row, 5);
        let (text, bgs) = render_to_string(&row, "buy milk");
        assert!(bgs.contains(&Color::Green));
        assert!(!bgs.contains(&Color::Red));
        assert!(!text.contains("Delete"));
    }

    #[test]
    fn test_half_drag_scales_surface_content() {
        let log = EventLog::default();
        let mut row = test_row(&log);

        press_and_drag(&mut row, -5);
        assert_eq!(row.offset(), -50.0);
        assert!((row.reveal_scale() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_trim_line_head_handles_wide_chars() {
        let line = Line::from(vec![Span::raw("日本"), Span::raw("rest")]);
        // Cutting one column lands inside the two-column character.
        let trimmed = trim_line_head(line, 1);
        let text: String = trimmed
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, " 本rest");

        let line = Line::from(vec![Span::raw("日本"), Span::raw("rest")]);
        let trimmed = trim_line_head(line, 4);
        let text: String = trimmed
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "rest");
    }
}
