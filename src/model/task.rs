//! Task data model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single task in the list. Rows are keyed by `id`, which stays stable for
/// the life of the task so per-row gesture state never migrates between
/// tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub done: bool,
    pub created_at: DateTime<Local>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Local>>,
}

impl Task {
    pub fn new(id: u64, title: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            done: false,
            created_at: Local::now(),
            completed_at: None,
        }
    }

    pub fn toggle_done(&mut self) {
        self.done = !self.done;
        self.completed_at = if self.done { Some(Local::now()) } else { None };
    }

    pub fn status_icon(&self) -> &str {
        if self.done {
            "✓"
        } else {
            "○"
        }
    }

    /// Compact age label for the list line, relative to `now`.
    pub fn age_label(&self, now: DateTime<Local>) -> String {
        let age = now.signed_duration_since(self.created_at);
        if age.num_minutes() < 1 {
            "just now".to_string()
        } else if age.num_hours() < 1 {
            format!("{}m ago", age.num_minutes())
        } else if age.num_days() < 1 {
            format!("{}h ago", age.num_hours())
        } else {
            format!("{}d ago", age.num_days())
        }
    }
}

/// Next free id for a new task.
pub fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_toggle_done_tracks_completion_time() {
        let mut task = Task::new(1, "water the plants");
        assert!(!task.done);
        assert!(task.completed_at.is_none());

        task.toggle_done();
        assert!(task.done);
        assert!(task.completed_at.is_some());

        task.toggle_done();
        assert!(!task.done);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_age_label_buckets() {
        let task = Task::new(1, "buy milk");
        let created = task.created_at;

        assert_eq!(task.age_label(created + Duration::seconds(30)), "just now");
        assert_eq!(task.age_label(created + Duration::minutes(5)), "5m ago");
        assert_eq!(task.age_label(created + Duration::hours(3)), "3h ago");
        assert_eq!(task.age_label(created + Duration::days(2)), "2d ago");
    }

    #[test]
    fn test_next_id_skips_existing() {
        assert_eq!(next_id(&[]), 1);

        let tasks = vec![Task::new(1, "a"), Task::new(7, "b"), Task::new(3, "c")];
        assert_eq!(next_id(&tasks), 8);
    }
}
