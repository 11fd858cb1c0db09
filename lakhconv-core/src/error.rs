//! Core error types for `lakhconv`.

use thiserror::Error;

/// Core error type for `lakhconv` operations.
///
/// The conversion path itself never fails; these errors come from building
/// domain values out of untrusted data and from rate providers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Exchange rate is zero, negative, or not finite.
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(f64),

    /// No exchange rate could be obtained.
    #[error("Exchange rate unavailable: {0}")]
    RateUnavailable(String),

    /// Invalid data from a rate feed or stored file.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
