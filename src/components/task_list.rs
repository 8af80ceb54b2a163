//! Task list component
//!
//! Hosts one swipe row per task. The list owns selection and the scroll
//! window, maps mouse events onto row rects, and keeps the row map keyed by
//! task id so gesture state stays with its task across reorders and
//! removals. Rows report committed actions through an mpsc channel; the app
//! drains it and mutates the task list, so a row never observes the outcome
//! of its own commit.

use crate::action::Action;
use crate::component::Component;
use crate::components::{SwipeAction, SwipeRow};
use crate::feedback::{FeedbackEmitter, Silent, TerminalBell};
use crate::model::Task;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// A committed row action, reported to the app for it to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowCommand {
    /// Toggle completion of the task
    Complete(u64),
    /// Remove the task
    Delete(u64),
}

/// Per-task row bookkeeping. `done` records the state the row's surfaces
/// were built for; descriptors are fixed for a row's lifetime, so a row is
/// rebuilt (once at rest) when its task's done flag changes.
struct RowEntry {
    done: bool,
    row: SwipeRow,
}

/// The task list: swipe rows plus selection and scrolling
pub struct TaskListComponent {
    rows: HashMap<u64, RowEntry>,
    commands: Sender<RowCommand>,
    /// Ring the bell on commits
    bell: bool,
    pub selected: usize,
    scroll: usize,
    /// Task id holding the pointer grab between mouse down and up
    active_grab: Option<u64>,
}

impl TaskListComponent {
    pub fn new(commands: Sender<RowCommand>, bell: bool) -> Self {
        Self {
            rows: HashMap::new(),
            commands,
            bell,
            selected: 0,
            scroll: 0,
            active_grab: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Row lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Reconcile the row map with the current tasks: build rows for new
    /// tasks, drop rows whose task is gone (which also cancels any close
    /// they had scheduled), and rebuild settled rows whose done flag
    /// changed so their surfaces match.
    fn sync_rows(&mut self, tasks: &[Task]) {
        let ids: HashSet<u64> = tasks.iter().map(|t| t.id).collect();
        self.rows.retain(|id, _| ids.contains(id));
        if let Some(id) = self.active_grab {
            if !ids.contains(&id) {
                self.active_grab = None;
            }
        }
        for task in tasks {
            let rebuild = match self.rows.get(&task.id) {
                None => true,
                Some(entry) => entry.done != task.done && entry.row.is_at_rest(),
            };
            if rebuild {
                self.rows.insert(
                    task.id,
                    RowEntry {
                        done: task.done,
                        row: self.build_row(task),
                    },
                );
            }
        }
    }

    fn build_row(&self, task: &Task) -> SwipeRow {
        let id = task.id;
        let complete_tx = self.commands.clone();
        let delete_tx = self.commands.clone();
        let feedback: Box<dyn FeedbackEmitter> = if self.bell {
            Box::new(TerminalBell)
        } else {
            Box::new(Silent)
        };
        // Completed tasks swap both surfaces: undo on the left, and the
        // removal side reads "Clear" instead of "Delete".
        let (leading, trailing) = if task.done {
            (
                SwipeAction::new("↺", Color::Black, Color::Yellow).with_label("Undo"),
                SwipeAction::delete().with_label("Clear"),
            )
        } else {
            (SwipeAction::complete(), SwipeAction::delete())
        };
        SwipeRow::new()
            .with_feedback(feedback)
            .leading_action(leading)
            .trailing_action(trailing)
            .on_leading(move || {
                let _ = complete_tx.send(RowCommand::Complete(id));
            })
            .on_trailing(move || {
                let _ = delete_tx.send(RowCommand::Delete(id));
            })
    }

    /// Advance every row's animations and scheduled closes.
    pub fn tick_rows(&mut self, now: Instant) {
        for entry in self.rows.values_mut() {
            entry.row.tick(now);
        }
    }

    /// Force-close every row, whatever state it is in.
    pub fn close_open_rows(&mut self) {
        for entry in self.rows.values_mut() {
            entry.row.close();
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    pub fn selected_id(&self, tasks: &[Task]) -> Option<u64> {
        tasks.get(self.selected).map(|t| t.id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mouse
    // ─────────────────────────────────────────────────────────────────────────

    /// Route a mouse event to the row under it. Presses grab a row until
    /// release; grabbing a row force-closes every other row first, so only
    /// one surface is ever revealed across the list.
    pub fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        area: Rect,
        tasks: &[Task],
        now: Instant,
    ) -> Option<Action> {
        self.sync_rows(tasks);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let idx = self.row_at(area, mouse.row, tasks.len())?;
                let id = tasks[idx].id;
                self.selected = idx;
                for (other_id, entry) in self.rows.iter_mut() {
                    if *other_id != id && !entry.row.is_at_rest() {
                        debug!(id = other_id, "force-closing row for new grab");
                        entry.row.close();
                    }
                }
                let row_rect = self.row_area(area, idx);
                if let Some(entry) = self.rows.get_mut(&id) {
                    entry.row.mouse_down(mouse.column, row_rect);
                    self.active_grab = Some(id);
                }
                None
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let id = self.active_grab?;
                if let Some(entry) = self.rows.get_mut(&id) {
                    entry.row.mouse_drag(mouse.column);
                }
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let id = self.active_grab.take()?;
                if let Some(entry) = self.rows.get_mut(&id) {
                    entry.row.mouse_up(now);
                }
                None
            }
            MouseEventKind::ScrollDown => Some(Action::NextItem),
            MouseEventKind::ScrollUp => Some(Action::PrevItem),
            _ => None,
        }
    }

    /// Task index under a terminal row, honoring the scroll window.
    fn row_at(&self, area: Rect, y: u16, len: usize) -> Option<usize> {
        if y < area.y || y >= area.y + area.height {
            return None;
        }
        let idx = self.scroll + (y - area.y) as usize;
        (idx < len).then_some(idx)
    }

    fn row_area(&self, area: Rect, idx: usize) -> Rect {
        let offset = (idx - self.scroll) as u16;
        Rect::new(area.x, area.y + offset, area.width, 1)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Render the visible window of tasks through their rows.
    pub fn draw_tasks(&mut self, frame: &mut Frame, area: Rect, tasks: &[Task]) {
        self.sync_rows(tasks);

        if tasks.is_empty() {
            let placeholder = Paragraph::new(Line::from(Span::styled(
                "No tasks - press n to add one",
                Style::default().fg(Color::DarkGray),
            )));
            frame.render_widget(placeholder, area);
            return;
        }

        // Clamp selection and keep it inside the scroll window
        let height = area.height as usize;
        if self.selected >= tasks.len() {
            self.selected = tasks.len() - 1;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
        if height > 0 && self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }

        let now = Local::now();
        for (offset, task) in tasks.iter().skip(self.scroll).take(height).enumerate() {
            let idx = self.scroll + offset;
            let row_area = Rect::new(area.x, area.y + offset as u16, area.width, 1);
            let content = task_line(task, idx == self.selected, area.width, now);
            if let Some(entry) = self.rows.get(&task.id) {
                entry.row.draw(frame, row_area, content);
            }
        }
    }
}

impl Component for TaskListComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Char(' ') => Some(Action::ToggleDone),
            KeyCode::Char('n') => Some(Action::OpenNewTask),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Esc => Some(Action::CloseOpenRows),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Rendering needs the tasks; see draw_tasks
        Ok(())
    }
}

/// Build one task's content line: selection marker, status icon, title, and
/// a right-aligned age label when it fits.
fn task_line(task: &Task, selected: bool, width: u16, now: chrono::DateTime<Local>) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let icon_style = if task.done {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let title_style = if task.done {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{} ", task.status_icon()), icon_style),
        Span::styled(task.title.clone(), title_style),
    ];

    let age = task.age_label(now);
    let used = 2 + 2 + task.title.width();
    let needed = used + age.width() + 2;
    if (width as usize) > needed {
        let pad = width as usize - needed;
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled(
            format!("{}  ", age),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}
