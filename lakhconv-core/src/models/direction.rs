//! Conversion direction and formatting options.

use serde::{Deserialize, Serialize};

// ============================================================================
// Currency
// ============================================================================

/// The two supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian Rupee, quoted in lakh and crore.
    Inr,
    /// US Dollar, quoted in thousands, millions and billions.
    Usd,
}

impl Currency {
    /// Returns the ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Direction
// ============================================================================

/// Which way a conversion goes.
///
/// Determines both the rate arithmetic (multiply for INR → USD, divide for
/// USD → INR) and the notation used for the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Rupees in, dollars out.
    #[default]
    InrToUsd,
    /// Dollars in, rupees out.
    UsdToInr,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn swap(self) -> Self {
        match self {
            Self::InrToUsd => Self::UsdToInr,
            Self::UsdToInr => Self::InrToUsd,
        }
    }

    /// Currency of the input amount.
    pub fn source(&self) -> Currency {
        match self {
            Self::InrToUsd => Currency::Inr,
            Self::UsdToInr => Currency::Usd,
        }
    }

    /// Currency of the converted amount.
    pub fn target(&self) -> Currency {
        self.swap().source()
    }

    /// Returns a human-readable label, e.g. `INR → USD`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InrToUsd => "INR → USD",
            Self::UsdToInr => "USD → INR",
        }
    }

    /// Input placeholder hint for this direction.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::InrToUsd => "e.g. 1.5Cr or 50L",
            Self::UsdToInr => "e.g. 2.3B or 10K",
        }
    }

    /// All directions.
    pub fn all() -> &'static [Direction] {
        &[Self::InrToUsd, Self::UsdToInr]
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "inr_to_usd" | "inr_usd" | "inr" => Ok(Self::InrToUsd),
            "usd_to_inr" | "usd_inr" | "usd" => Ok(Self::UsdToInr),
            other => Err(format!("Unknown direction: {other}")),
        }
    }
}

// ============================================================================
// Formatting Options
// ============================================================================

/// Output formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingOptions {
    /// Fix the output to two decimal places.
    pub rounded: bool,
}

impl FormattingOptions {
    /// Two-decimal output.
    pub fn rounded() -> Self {
        Self { rounded: true }
    }

    /// Unrounded output.
    pub fn exact() -> Self {
        Self { rounded: false }
    }
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self::rounded()
    }
}

// ============================================================================
// Tests
// ============================================================================
