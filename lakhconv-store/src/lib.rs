// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # lakhconv Store
//!
//! Local state for lakhconv.
//!
//! - **HistoryStore**: the last 15 successful conversions, newest first
//! - **SettingsStore**: user preferences with persistence
//! - **RateCache**: last fetched exchange rate
//! - **Persistence**: state file layout and atomic JSON reads and writes
//!
//! ## Usage
//!
//! ```ignore
//! use lakhconv_store::{HistoryStore, SettingsStore};
//!
//! let settings = SettingsStore::load_default().await;
//! let history = HistoryStore::load_default().await;
//!
//! let result = lakhconv_core::convert("1Cr", settings.direction().await, true, Some(0.012));
//! history.record("1Cr", &result, settings.direction().await).await?;
//! ```

pub mod error;
pub mod history_store;
pub mod persistence;
pub mod rate_cache;
pub mod settings_store;

pub use error::StoreError;
pub use history_store::{HistoryStore, MAX_HISTORY_ENTRIES};
pub use persistence::{
    ReadOutcome, StateFile, default_cache_dir, default_config_dir, read_state,
    read_state_or_default, remove_state, write_state,
};
pub use rate_cache::RateCache;
pub use settings_store::{LogLevel, Settings, SettingsStore};
