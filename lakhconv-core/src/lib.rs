// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `lakhconv` Core
//!
//! Amount parsing, magnitude formatting, and INR/USD conversion.
//!
//! Everything in this crate is pure and synchronous: no I/O, no shared
//! state. Rates come from the caller (see [`RateProvider`]).
//!
//! ## Key Functions
//!
//! - [`parse_amount`] - `"1.5Cr"`, `"50L"`, `"2.3B"` → base units
//! - [`format_inr`] - base units → lakh/crore notation
//! - [`format_usd`] - base units → K/M/B notation
//! - [`convert`] - parse, apply rate, format
//!
//! ## Key Types
//!
//! - [`Direction`] - INR → USD or USD → INR
//! - [`FormattedAmount`] - bare number or formatted text
//! - [`ConversionResult`] - converted value or `Invalid input`
//! - [`ExchangeRate`] - validated USD-per-INR rate
//! - [`HistoryEntry`] - a past conversion
//! - [`ConversionService`] - per-session rate, direction, and rounding

pub mod convert;
pub mod error;
pub mod format;
pub mod models;
pub mod parser;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export operations
pub use convert::{ConversionService, convert, convert_with};
pub use format::{format_inr, format_usd};
pub use parser::parse_amount;

// Re-export all model types
pub use models::{
    ConversionResult, Currency, Direction, ExchangeRate, FormattedAmount, FormattingOptions,
    HistoryEntry, INVALID_INPUT,
};

// Re-export traits
pub use traits::{FixedRate, RateProvider};
