//! Conversion history store.
//!
//! Keeps the most recent successful conversions, newest first, and persists
//! them as a JSON array.

use lakhconv_core::{ConversionResult, Direction, HistoryEntry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{StateFile, read_state_or_default, remove_state, write_state};

/// Maximum number of history entries kept.
pub const MAX_HISTORY_ENTRIES: usize = 15;

/// Persistent, capped conversion history.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
    path: PathBuf,
}

impl HistoryStore {
    /// Creates an empty store backed by `path`. Nothing is read from disk.
    pub fn new(path: PathBuf) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            path,
        }
    }

    /// Loads history from the default path.
    pub async fn load_default() -> Self {
        Self::load(StateFile::History.default_path()).await
    }

    /// Loads history from `path`.
    ///
    /// A missing or corrupt file yields an empty history. Oversized files are
    /// truncated to [`MAX_HISTORY_ENTRIES`].
    pub async fn load(path: PathBuf) -> Self {
        let mut entries: Vec<HistoryEntry> = read_state_or_default(&path).await;
        entries.truncate(MAX_HISTORY_ENTRIES);
        debug!(path = %path.display(), count = entries.len(), "History loaded");

        Self {
            entries: Arc::new(RwLock::new(entries)),
            path,
        }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, newest first.
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.clone()
    }

    /// Most recent entry.
    pub async fn latest(&self) -> Option<HistoryEntry> {
        self.entries.read().await.first().cloned()
    }

    /// Number of entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if there are no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Prepends `entry`, dropping the oldest beyond the cap.
    pub async fn push(&self, entry: HistoryEntry) {
        let mut entries = self.entries.write().await;
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY_ENTRIES);
    }

    /// Records a conversion if it succeeded, then saves.
    ///
    /// Invalid results are not recorded. Returns the new entry, if any.
    ///
    /// # Errors
    ///
    /// Returns error if the history cannot be written to disk.
    pub async fn record(
        &self,
        input: &str,
        result: &ConversionResult,
        direction: Direction,
    ) -> Result<Option<HistoryEntry>, StoreError> {
        if !result.is_converted() {
            return Ok(None);
        }

        let entry = HistoryEntry::new(input, result.to_string(), direction);
        self.push(entry.clone()).await;
        self.save().await?;
        Ok(Some(entry))
    }

    /// Saves history to disk.
    ///
    /// # Errors
    ///
    /// Returns error if the history cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let entries = self.entries.read().await;
        write_state(&self.path, &*entries).await?;
        debug!(path = %self.path.display(), count = entries.len(), "History saved");
        Ok(())
    }

    /// Drops all entries and deletes the backing file.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be removed.
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.entries.write().await.clear();
        if remove_state(&self.path).await? {
            info!(path = %self.path.display(), "History cleared");
        }
        Ok(())
    }
}
