//! Domain models for lakhconv.
//!
//! ## Submodules
//!
//! - [`direction`] - Conversion direction and formatting options
//! - [`amount`] - Formatted amounts and conversion results
//! - [`rate`] - Exchange rate snapshot
//! - [`history`] - Conversion history entries

mod amount;
mod direction;
mod history;
mod rate;

// Re-export everything at the models level
pub use amount::{ConversionResult, FormattedAmount, INVALID_INPUT};
pub use direction::{Currency, Direction, FormattingOptions};
pub use history::HistoryEntry;
pub use rate::ExchangeRate;
#[cfg(test)]
mod serde_tests;
