//! Tracker configuration.

use crate::persist::STORAGE_KEY;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "INITIATIVE_DATA_DIR";

/// Environment variable overriding the storage key.
pub const STORAGE_KEY_ENV: &str = "INITIATIVE_STORAGE_KEY";

/// Configuration for opening a tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Directory holding persisted rosters.
    pub data_dir: PathBuf,

    /// Key the roster is stored under.
    pub storage_key: String,

    /// How long a notification stays on screen.
    pub notification_duration: Duration,
}

impl TrackerConfig {
    /// Create a config that stores data in `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: STORAGE_KEY.to_string(),
            notification_duration: Duration::from_secs(3),
        }
    }

    /// Build from the process environment.
    ///
    /// Falls back to `$HOME/.initiative`, or `./.initiative` without a home.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                lookup("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".initiative")
            });

        let mut config = Self::new(data_dir);
        if let Some(key) = lookup(STORAGE_KEY_ENV).filter(|v| !v.is_empty()) {
            config.storage_key = key;
        }
        config
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set how long notifications stay visible.
    pub fn with_notification_duration(mut self, duration: Duration) -> Self {
        self.notification_duration = duration;
        self
    }
}
