//! # Configuration data
//!
//! Plain data structures deserialized from `config.toml`. Every field has a
//! default, so a partial or empty file yields a complete configuration.
//! Loading and error reporting live in the binary's bootstrap.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub history: HistoryConfig,
    pub watcher: WatcherConfig,
    pub paste: PasteConfig,
    pub hotkeys: HotkeyConfig,
    pub theme: ThemeConfig,
}

/// What to do when writing history or theme to disk fails.
///
/// The in-memory state stays authoritative whichever policy is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceFailurePolicy {
    Ignore,
    #[default]
    Log,
    Retry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Overrides `<app data>/history.json`.
    pub path: Option<PathBuf>,
    /// Oldest entries beyond this count are dropped. Unset keeps everything.
    pub max_entries: Option<usize>,
    pub on_persistence_failure: PersistenceFailurePolicy,
    /// Total write attempts under [`PersistenceFailurePolicy::Retry`].
    pub retry_attempts: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_entries: None,
            on_persistence_failure: PersistenceFailurePolicy::Log,
            retry_attempts: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    pub poll_interval_ms: u64,
}

impl WatcherConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasteConfig {
    /// Wait before synthesizing the paste keystroke so focus can return to
    /// the previously active application.
    pub delay_ms: u64,
}

impl PasteConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for PasteConfig {
    fn default() -> Self {
        Self { delay_ms: 200 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    pub paste_popup: String,
    pub copy: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            paste_popup: "ctrl+v".to_string(),
            copy: "ctrl+c".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Overrides `<app data>/theme.json`.
    pub path: Option<PathBuf>,
}
