//! Formatted amounts and conversion results.

use serde::{Deserialize, Serialize};

/// The literal shown when a conversion cannot be performed.
pub const INVALID_INPUT: &str = "Invalid input";

// ============================================================================
// Formatted Amount
// ============================================================================

/// Output of the magnitude formatters.
///
/// Rounded output and any output carrying a magnitude suffix is text.
/// Unrounded output below the smallest bucket stays a bare number. Serializes
/// untagged, so JSON consumers see either a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormattedAmount {
    /// Bare number, no suffix applied.
    Number(f64),
    /// Formatted text, possibly with a suffix.
    Text(String),
}

impl FormattedAmount {
    /// Returns true for the bare-number variant.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns the bare number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl std::fmt::Display for FormattedAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// Conversion Result
// ============================================================================

/// Result of a single conversion.
///
/// Failure is an ordinary value: it displays as [`INVALID_INPUT`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionResult {
    /// Conversion succeeded.
    Converted {
        /// Parsed input amount in base units.
        amount: f64,
        /// Converted amount in base units of the target currency.
        converted: f64,
        /// Converted amount in target notation.
        formatted: FormattedAmount,
    },
    /// Input parsed to zero or no usable rate was supplied.
    Invalid,
}

impl ConversionResult {
    /// Returns true if the conversion succeeded.
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    /// Returns the formatted output, if the conversion succeeded.
    pub fn formatted(&self) -> Option<&FormattedAmount> {
        match self {
            Self::Converted { formatted, .. } => Some(formatted),
            Self::Invalid => None,
        }
    }

    /// Returns the converted base amount, if the conversion succeeded.
    pub fn converted(&self) -> Option<f64> {
        match self {
            Self::Converted { converted, .. } => Some(*converted),
            Self::Invalid => None,
        }
    }
}

impl std::fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Converted { formatted, .. } => write!(f, "{formatted}"),
            Self::Invalid => f.write_str(INVALID_INPUT),
        }
    }
}
