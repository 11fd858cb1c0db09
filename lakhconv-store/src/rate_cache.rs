//! Last known exchange rate.
//!
//! The cache is what lets `--offline` work and what the CLI falls back to
//! when the feed is unreachable. Its age is reported but never enforced.

use lakhconv_core::ExchangeRate;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::persistence::{ReadOutcome, StateFile, read_state, remove_state, write_state};

/// File-backed cache of the most recently fetched rate.
#[derive(Debug, Clone)]
pub struct RateCache {
    path: PathBuf,
}

impl RateCache {
    /// Creates a cache backed by `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a cache at the default location.
    pub fn at_default_path() -> Self {
        Self::new(StateFile::RateCache.default_path())
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached rate, if present and valid.
    pub async fn load(&self) -> Option<ExchangeRate> {
        match read_state::<ExchangeRate>(&self.path).await {
            ReadOutcome::Loaded(rate) if rate.is_valid() => {
                debug!(path = %self.path.display(), "Using cached rate");
                Some(rate)
            }
            ReadOutcome::Loaded(rate) => {
                warn!(usd_per_inr = rate.usd_per_inr(), "Ignoring invalid cached rate");
                None
            }
            ReadOutcome::Missing => None,
            ReadOutcome::Unreadable(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read rate cache");
                None
            }
        }
    }

    /// Stores `rate`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns error if the cache cannot be written.
    pub async fn store(&self, rate: &ExchangeRate) -> Result<(), StoreError> {
        write_state(&self.path, rate).await
    }

    /// Deletes the cache file.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be removed.
    pub async fn clear(&self) -> Result<(), StoreError> {
        remove_state(&self.path).await.map(|_| ())
    }
}
