//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that routes events to the task list and modal dialogs. It also
//! owns the receiving end of the row command channel: rows report committed
//! actions, and App applies them to the tasks on the next tick. Deletes are
//! held back for a moment before they are applied, which is when the row
//! shows its busy state.

use crate::action::Action;
use crate::component::Component;
use crate::components::{calculate_main_layout, HelpDialog, RowCommand, TaskListComponent};
use crate::config::Config;
use crate::model::task;
use crate::model::{Modal, ModalStack, Task};
use crate::services::Store;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long a committed delete is held before the task is removed
const DELETE_APPLY_DELAY: Duration = Duration::from_millis(250);

/// How long a status message stays on screen
const STATUS_TTL: Duration = Duration::from_secs(3);

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// All tasks, in display order
    pub tasks: Vec<Task>,

    /// Task persistence
    store: Store,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Committed row actions waiting to be applied
    commands_rx: Receiver<RowCommand>,

    /// Deletes waiting out their hold, by task id and due time
    pending_deletes: Vec<(u64, Instant)>,

    /// Transient status line and when it expires
    status_message: Option<(String, Instant)>,

    /// Area of the last draw, for mapping mouse events onto the layout
    last_area: Rect,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub task_list: TaskListComponent,
    pub help_dialog: HelpDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    /// Create a new App instance, loading tasks from the configured store
    pub fn new(config: &Config) -> Result<App> {
        let path = match config.tasks_path.clone() {
            Some(p) => p,
            None => Store::default_path().context("could not determine the task file location")?,
        };
        let store = Store::new(path);
        let tasks = store.load().context("loading tasks")?;

        let (tx, rx) = mpsc::channel();

        Ok(App {
            should_quit: false,
            tasks,
            store,
            modals: ModalStack::new(),
            commands_rx: rx,
            pending_deletes: Vec::new(),
            status_message: None,
            last_area: Rect::default(),
            task_list: TaskListComponent::new(tx, config.bell),
            help_dialog: HelpDialog::default(),
        })
    }

    fn set_status(&mut self, message: impl Into<String>, now: Instant) {
        self.status_message = Some((message.into(), now + STATUS_TTL));
    }

    fn save_tasks(&self) {
        if let Err(e) = self.store.save(&self.tasks) {
            warn!(error = %e, "failed to save tasks");
        }
    }

    /// Drain the row command channel and apply what the rows committed.
    fn apply_commands(&mut self, now: Instant) {
        while let Ok(command) = self.commands_rx.try_recv() {
            debug!(?command, "applying row command");
            match command {
                RowCommand::Complete(id) => self.toggle_task(id, now),
                RowCommand::Delete(id) => {
                    self.pending_deletes.push((id, now + DELETE_APPLY_DELAY));
                }
            }
        }
    }

    /// Remove tasks whose delete hold has run out.
    fn apply_due_deletes(&mut self, now: Instant) {
        let due: Vec<u64> = self
            .pending_deletes
            .iter()
            .filter(|(_, at)| *at <= now)
            .map(|(id, _)| *id)
            .collect();
        if due.is_empty() {
            return;
        }
        self.pending_deletes.retain(|(_, at)| *at > now);
        for id in due {
            if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
                let removed = self.tasks.remove(pos);
                self.set_status(format!("Deleted '{}'", removed.title), now);
            }
        }
        self.save_tasks();
    }

    fn toggle_task(&mut self, id: u64, now: Instant) {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return;
        };
        task.toggle_done();
        let message = if task.done {
            format!("Completed '{}'", task.title)
        } else {
            format!("Reopened '{}'", task.title)
        };
        self.set_status(message, now);
        self.save_tasks();
    }

    fn add_task(&mut self, title: &str, now: Instant) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        let id = task::next_id(&self.tasks);
        self.tasks.push(Task::new(id, title));
        self.task_list.last(self.tasks.len());
        self.set_status(format!("Added '{}'", title), now);
        self.save_tasks();
    }

    fn expire_status(&mut self, now: Instant) {
        if let Some((_, until)) = &self.status_message {
            if *until <= now {
                self.status_message = None;
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }
        self.task_list.handle_key_event(key)
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        // Modals are keyboard-only; a click outside them does nothing
        if !self.modals.is_empty() {
            return Ok(None);
        }
        let layout = calculate_main_layout(self.last_area);
        Ok(self
            .task_list
            .handle_mouse(mouse, layout.list, &self.tasks, Instant::now()))
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                let now = Instant::now();
                self.apply_commands(now);
                self.apply_due_deletes(now);
                self.task_list.tick_rows(now);
                self.expire_status(now);
            }
            Action::Resize(_, _) => {}
            Action::Quit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Navigation (delegate to TaskListComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextItem => self.task_list.next(self.tasks.len()),
            Action::PrevItem => self.task_list.previous(),
            Action::FirstItem => self.task_list.first(),
            Action::LastItem => self.task_list.last(self.tasks.len()),

            // ─────────────────────────────────────────────────────────────────
            // Tasks
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleDone => {
                if let Some(id) = self.task_list.selected_id(&self.tasks) {
                    self.toggle_task(id, Instant::now());
                }
            }
            Action::CloseOpenRows => self.task_list.close_open_rows(),
            Action::SubmitNewTask(title) => {
                self.modals.pop();
                self.add_task(&title, Instant::now());
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help { scroll_offset: 0 });
            }
            Action::OpenNewTask => {
                self.modals.push(Modal::NewTask {
                    input: String::new(),
                });
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.last_area = area;
        let layout = calculate_main_layout(area);

        self.draw_title_bar(frame, layout.title);
        self.task_list.draw_tasks(frame, layout.list, &self.tasks);
        self.draw_status_line(frame, layout.status);
        self.draw_help_bar(frame, layout.help);

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::Help { .. } => self.help_dialog.handle_key_event(key),
            Modal::NewTask { input } => {
                let action = match key.code {
                    KeyCode::Esc => Some(Action::CloseModal),
                    KeyCode::Enter => Some(Action::SubmitNewTask(input.clone())),
                    KeyCode::Backspace => {
                        if let Some(Modal::NewTask { input }) = self.modals.top_mut() {
                            input.pop();
                        }
                        None
                    }
                    KeyCode::Char(c) => {
                        if let Some(Modal::NewTask { input }) = self.modals.top_mut() {
                            input.push(c);
                        }
                        None
                    }
                    _ => None,
                };
                Ok(action)
            }
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::Help { .. } => self.help_dialog.draw(frame, area)?,
            Modal::NewTask { input } => self.draw_new_task(frame, area, input)?,
        }
        Ok(())
    }

    fn draw_title_bar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::style::{Color, Modifier, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::Paragraph;

        let open = self.tasks.iter().filter(|t| !t.done).count();
        let done = self.tasks.len() - open;

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " flick ",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} open / {} done", open, done),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        frame.render_widget(title, area);
    }

    fn draw_status_line(&self, frame: &mut Frame, area: Rect) {
        use ratatui::style::{Color, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::Paragraph;

        if let Some((message, _)) = &self.status_message {
            let status = Paragraph::new(Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Green),
            )));
            frame.render_widget(status, area);
        }
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::style::{Color, Modifier, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::Paragraph;

        let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" drag → ", key_style),
            Span::raw("Complete  "),
            Span::styled(" drag ← ", key_style),
            Span::raw("Delete  "),
            Span::styled(" n ", key_style),
            Span::raw("New  "),
            Span::styled(" ? ", key_style),
            Span::raw("Help  "),
            Span::styled(" q ", key_style),
            Span::raw("Quit"),
        ]));
        frame.render_widget(help, area);
    }

    fn draw_new_task(&self, frame: &mut Frame, area: Rect, input: &str) -> Result<()> {
        use crate::components::centered_popup;
        use ratatui::style::{Color, Modifier, Style};
        use ratatui::text::{Line, Span};
        use ratatui::widgets::{Block, Borders, Clear, Paragraph};

        let popup_area = centered_popup(area, 60, 10);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "What needs doing?",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("> {}_", input),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Add  "),
                Span::styled(
                    " Esc ",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" New Task ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .alignment(ratatui::layout::Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
