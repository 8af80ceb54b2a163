//! Task list persistence
//!
//! Tasks live in a single JSON file, by default under `~/.flick-tui/`.
//! A missing file yields the starter tasks rather than an error so a first
//! run opens with something to swipe.

use crate::model::Task;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task file io: {0}")]
    Io(#[from] std::io::Error),
    #[error("task file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk wrapper for the task list
#[derive(Debug, Serialize, Deserialize)]
struct TaskFile {
    tasks: Vec<Task>,
}

/// Reads and writes the task list at a fixed path.
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn data_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".flick-tui"))
    }

    /// Default location of the task file.
    pub fn default_path() -> Option<PathBuf> {
        Self::data_dir().map(|dir| dir.join("tasks.json"))
    }

    /// Load the task list, seeding starter tasks when no file exists yet.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        if !self.path.exists() {
            return Ok(seed_tasks());
        }
        let contents = fs::read_to_string(&self.path)?;
        let file: TaskFile = serde_json::from_str(&contents)?;
        Ok(file.tasks)
    }

    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let file = TaskFile {
            tasks: tasks.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Starter tasks that double as gesture instructions.
fn seed_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "Drag a row right to complete it"),
        Task::new(2, "Drag a row left, then tap the surface, to delete it"),
        Task::new(3, "Press n to add your own task"),
        Task::new(4, "Press ? for all keys and gestures"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_seeds_starter_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("tasks.json"));

        let tasks = store.load().unwrap();
        assert!(!tasks.is_empty());

        let mut ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), tasks.len());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested").join("tasks.json"));

        let mut tasks = vec![Task::new(1, "buy milk"), Task::new(2, "water the plants")];
        tasks[0].toggle_done();
        store.save(&tasks).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "buy milk");
        assert!(loaded[0].done);
        assert!(loaded[0].completed_at.is_some());
        assert_eq!(loaded[1].id, 2);
        assert!(!loaded[1].done);
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{not json").unwrap();

        let err = Store::new(path).load().unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }
}
