//! User preferences store.
//!
//! Manages user settings with persistence and change notification.

use lakhconv_core::{Direction, FormattingOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, watch};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{ReadOutcome, StateFile, read_state, remove_state, write_state};

// ============================================================================
// Settings Types
// ============================================================================

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default conversion direction.
    pub direction: Direction,

    /// Round results to two decimals.
    pub rounded: bool,

    /// Rate endpoint tried before the built-in ones.
    pub rate_endpoint: Option<String>,

    /// HTTP timeout for rate requests, in seconds.
    pub request_timeout_secs: u64,

    /// Attempts per rate endpoint before moving to the next one.
    pub fetch_attempts: u32,

    /// Record successful conversions in the history.
    pub record_history: bool,

    /// Log level.
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            rounded: true,
            rate_endpoint: None,
            request_timeout_secs: 15,
            fetch_attempts: 3,
            record_history: true,
            log_level: LogLevel::default(),
        }
    }
}

impl Settings {
    /// Formatting options derived from these settings.
    pub fn formatting(&self) -> FormattingOptions {
        FormattingOptions {
            rounded: self.rounded,
        }
    }

    /// Rate request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Attempts per rate endpoint, at least one.
    pub fn fetch_attempts(&self) -> u32 {
        self.fetch_attempts.max(1)
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(StoreError::Parse(format!("Unknown log level: {other}"))),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store with change notifications.
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
    notify: watch::Sender<u64>,
    version: Arc<RwLock<u64>>,
}

impl SettingsStore {
    /// Creates a new settings store with default settings.
    pub fn new(path: PathBuf) -> Self {
        Self::with_settings(path, Settings::default())
    }

    fn with_settings(path: PathBuf, settings: Settings) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
            notify,
            version: Arc::new(RwLock::new(0)),
        }
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(StateFile::Settings.default_path()).await
    }

    /// Loads settings from a path, falling back to defaults.
    pub async fn load(path: PathBuf) -> Self {
        let settings = match read_state(&path).await {
            ReadOutcome::Loaded(settings) => {
                info!(path = %path.display(), "Settings loaded");
                settings
            }
            ReadOutcome::Missing => {
                debug!(path = %path.display(), "Settings file not found, using defaults");
                Settings::default()
            }
            ReadOutcome::Unreadable(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Settings::default()
            }
        };

        Self::with_settings(path, settings)
    }

    /// Backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings and notifies subscribers.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        {
            let mut settings = self.settings.write().await;
            f(&mut settings);
        }
        self.notify_change().await;
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        write_state(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    /// Restores defaults and deletes the settings file.
    ///
    /// Returns true if a file was removed.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be removed.
    pub async fn reset(&self) -> Result<bool, StoreError> {
        self.update(|s| *s = Settings::default()).await;
        let removed = remove_state(&self.path).await?;
        if removed {
            info!(path = %self.path.display(), "Settings reset");
        }
        Ok(removed)
    }

    /// Subscribes to settings changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    /// Notifies subscribers of a change.
    async fn notify_change(&self) {
        let mut version = self.version.write().await;
        *version += 1;
        let _ = self.notify.send(*version);
    }

    // ========================================================================
    // Convenience Methods
    // ========================================================================

    /// Default conversion direction.
    pub async fn direction(&self) -> Direction {
        self.settings.read().await.direction
    }

    /// Sets the default conversion direction.
    pub async fn set_direction(&self, direction: Direction) {
        self.update(|s| s.direction = direction).await;
    }

    /// Flips the default direction and returns the new one.
    pub async fn swap_direction(&self) -> Direction {
        let mut swapped = Direction::default();
        self.update(|s| {
            s.direction = s.direction.swap();
            swapped = s.direction;
        })
        .await;
        swapped
    }

    /// Whether results are rounded by default.
    pub async fn rounded(&self) -> bool {
        self.settings.read().await.rounded
    }

    /// Sets default rounding.
    pub async fn set_rounded(&self, rounded: bool) {
        self.update(|s| s.rounded = rounded).await;
    }

    /// Custom rate endpoint, if any.
    pub async fn rate_endpoint(&self) -> Option<String> {
        self.settings.read().await.rate_endpoint.clone()
    }

    /// Sets or clears the custom rate endpoint.
    pub async fn set_rate_endpoint(&self, endpoint: Option<String>) {
        self.update(|s| s.rate_endpoint = endpoint).await;
    }

    /// Whether conversions are recorded in the history.
    pub async fn record_history(&self) -> bool {
        self.settings.read().await.record_history
    }

    /// Enables or disables history recording.
    pub async fn set_record_history(&self, enabled: bool) {
        self.update(|s| s.record_history = enabled).await;
    }

    /// Sets the attempts made per rate endpoint.
    pub async fn set_fetch_attempts(&self, attempts: u32) {
        self.update(|s| s.fetch_attempts = attempts.max(1)).await;
    }
}
