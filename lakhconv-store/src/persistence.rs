//! On-disk layout and JSON access for lakhconv state.
//!
//! Settings and history live under the config directory, the rate cache
//! under the cache directory. Every file is pretty JSON, replaced through a
//! sibling temp file, and readable by the owner only.

use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

// ============================================================================
// Layout
// ============================================================================

/// Application directory name on macOS, where folders are title-cased.
#[cfg(target_os = "macos")]
const APP_DIR: &str = "Lakhconv";
/// Application directory name elsewhere.
#[cfg(not(target_os = "macos"))]
const APP_DIR: &str = "lakhconv";

/// Returns the configuration directory.
///
/// - macOS: `~/Library/Application Support/Lakhconv`
/// - Linux: `~/.config/lakhconv`
/// - Windows: `%APPDATA%\lakhconv`
pub fn default_config_dir() -> PathBuf {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else {
        dirs::config_dir()
    };
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Returns the cache directory.
///
/// - macOS: `~/Library/Caches/Lakhconv`
/// - Linux: `~/.cache/lakhconv`
/// - Windows: `%LOCALAPPDATA%\lakhconv`
pub fn default_cache_dir() -> PathBuf {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Caches"))
    } else {
        dirs::cache_dir()
    };
    base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// The files lakhconv keeps between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateFile {
    /// User preferences.
    Settings,
    /// Recent conversions.
    History,
    /// Last fetched exchange rate.
    RateCache,
}

impl StateFile {
    /// Every state file, in display order.
    pub const ALL: [StateFile; 3] = [StateFile::Settings, StateFile::History, StateFile::RateCache];

    /// File name inside its directory.
    pub fn file_name(self) -> &'static str {
        match self {
            StateFile::Settings => "settings.json",
            StateFile::History => "history.json",
            StateFile::RateCache => "rate_cache.json",
        }
    }

    /// Short label for listings.
    pub fn label(self) -> &'static str {
        match self {
            StateFile::Settings => "Settings file",
            StateFile::History => "History file",
            StateFile::RateCache => "Rate cache",
        }
    }

    /// Where this file lives by default. The rate cache is disposable and
    /// goes under the cache directory.
    pub fn default_path(self) -> PathBuf {
        let dir = match self {
            StateFile::Settings | StateFile::History => default_config_dir(),
            StateFile::RateCache => default_cache_dir(),
        };
        dir.join(self.file_name())
    }
}

// ============================================================================
// Reading
// ============================================================================

/// Result of reading a state file.
#[derive(Debug)]
pub enum ReadOutcome<T> {
    /// The file parsed.
    Loaded(T),
    /// No file yet.
    Missing,
    /// The file exists but could not be read or parsed.
    Unreadable(StoreError),
}

impl<T> ReadOutcome<T> {
    /// The loaded value, logging a warning when the file was unreadable.
    pub fn ok_or_warn(self, path: &Path) -> Option<T> {
        match self {
            ReadOutcome::Loaded(data) => Some(data),
            ReadOutcome::Missing => None,
            ReadOutcome::Unreadable(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable state file");
                None
            }
        }
    }
}

/// Reads and parses a state file.
pub async fn read_state<T: DeserializeOwned>(path: &Path) -> ReadOutcome<T> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "State file not found");
            return ReadOutcome::Missing;
        }
        Err(e) => return ReadOutcome::Unreadable(e.into()),
    };

    match serde_json::from_str(&content) {
        Ok(data) => ReadOutcome::Loaded(data),
        Err(e) => ReadOutcome::Unreadable(e.into()),
    }
}

/// Reads a state file, using the default value when it is missing or
/// unreadable. Only the unreadable case is logged.
pub async fn read_state_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    read_state(path).await.ok_or_warn(path).unwrap_or_default()
}

// ============================================================================
// Writing
// ============================================================================

#[cfg(unix)]
async fn restrict(path: &Path, mode: u32) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict(_path: &Path, _mode: u32) -> Result<(), StoreError> {
    Ok(())
}

/// Writes `data` as pretty JSON.
///
/// A missing parent directory is created owner-only (0700). The JSON goes
/// to `<name>.json.tmp`, is made owner-only (0600), then renamed over the
/// target, so readers never see a partial file.
pub async fn write_state<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
            restrict(parent, 0o700).await?;
            debug!(path = %parent.display(), "Created state directory");
        }
    }

    let json = serde_json::to_string_pretty(data)?;
    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, json).await?;
    restrict(&temp_path, 0o600).await?;
    tokio::fs::rename(&temp_path, path).await?;

    debug!(path = %path.display(), "State file written");
    Ok(())
}

/// Deletes a state file. Returns false if there was nothing to delete.
pub async fn remove_state(path: &Path) -> Result<bool, StoreError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "State file removed");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Tests
// ============================================================================
