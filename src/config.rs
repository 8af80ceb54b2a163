use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ring the terminal bell when an action commits
    #[serde(default = "default_bell")]
    pub bell: bool,
    /// Event poll timeout in milliseconds; bounds animation smoothness
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Override path for the task file
    #[serde(default)]
    pub tasks_path: Option<PathBuf>,
}

fn default_bell() -> bool {
    true
}

fn default_tick_rate_ms() -> u64 {
    33
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bell: default_bell(),
            tick_rate_ms: default_tick_rate_ms(),
            tasks_path: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".flick-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;
        self.write_to(&config_path)
    }

    fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.bell);
        assert_eq!(config.tick_rate_ms, 33);
        assert!(config.tasks_path.is_none());
    }

    #[test]
    fn test_written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        // The parent directory does not exist yet; the write creates it.
        let path = dir.path().join("dot-dir").join("config.json");

        let config = Config {
            bell: false,
            tick_rate_ms: 16,
            tasks_path: Some(PathBuf::from("/tmp/elsewhere.json")),
        };
        config.write_to(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Config = serde_json::from_str(&contents).unwrap();
        assert!(!parsed.bell);
        assert_eq!(parsed.tick_rate_ms, 16);
        assert_eq!(parsed.tasks_path, Some(PathBuf::from("/tmp/elsewhere.json")));
    }
}
