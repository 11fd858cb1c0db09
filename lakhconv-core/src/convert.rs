//! Conversion between INR and USD.

use crate::format::{format_inr, format_usd};
use crate::models::{ConversionResult, Direction, ExchangeRate, FormattingOptions};
use crate::parser::parse_amount;

/// Converts raw user input in the given direction.
///
/// `rate` is the USD value of one INR. The result is
/// [`ConversionResult::Invalid`] when the rate is missing, zero, negative or
/// not finite, when the input parses to zero, or when the converted value
/// overflows.
///
/// ```
/// use lakhconv_core::{convert, Direction};
///
/// let result = convert("1Cr", Direction::InrToUsd, true, Some(0.012));
/// assert_eq!(result.to_string(), "120.00K");
///
/// let result = convert("1Cr", Direction::InrToUsd, true, None);
/// assert_eq!(result.to_string(), "Invalid input");
/// ```
pub fn convert(
    raw: &str,
    direction: Direction,
    rounded: bool,
    rate: Option<f64>,
) -> ConversionResult {
    let amount = parse_amount(raw);

    let Some(rate) = rate.filter(|r| r.is_finite() && *r > 0.0) else {
        return ConversionResult::Invalid;
    };
    if amount == 0.0 {
        return ConversionResult::Invalid;
    }

    let (converted, formatted) = match direction {
        Direction::InrToUsd => {
            let converted = amount * rate;
            (converted, format_usd(converted, rounded))
        }
        Direction::UsdToInr => {
            let converted = amount / rate;
            (converted, format_inr(converted, rounded))
        }
    };

    if !converted.is_finite() {
        return ConversionResult::Invalid;
    }

    ConversionResult::Converted {
        amount,
        converted,
        formatted,
    }
}

/// [`convert`] with typed options and rate.
pub fn convert_with(
    raw: &str,
    direction: Direction,
    options: FormattingOptions,
    rate: Option<&ExchangeRate>,
) -> ConversionResult {
    convert(raw, direction, options.rounded, rate.map(ExchangeRate::usd_per_inr))
}

// ============================================================================
// Conversion Service
// ============================================================================

/// Conversion settings for a session: the rate obtained once, the current
/// direction, and the rounding preference.
///
/// Holds no I/O; the owner decides when the rate arrives and what to do with
/// results.
#[derive(Debug, Clone, Default)]
pub struct ConversionService {
    rate: Option<ExchangeRate>,
    direction: Direction,
    options: FormattingOptions,
}

impl ConversionService {
    /// Creates a service with no rate yet.
    pub fn new(direction: Direction, options: FormattingOptions) -> Self {
        Self {
            rate: None,
            direction,
            options,
        }
    }

    /// Sets the exchange rate.
    #[must_use]
    pub fn with_rate(mut self, rate: ExchangeRate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Replaces the exchange rate.
    pub fn set_rate(&mut self, rate: Option<ExchangeRate>) {
        self.rate = rate;
    }

    /// Current exchange rate, if any.
    pub fn rate(&self) -> Option<&ExchangeRate> {
        self.rate.as_ref()
    }

    /// Current direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current formatting options.
    pub fn options(&self) -> FormattingOptions {
        self.options
    }

    /// Flips the direction and returns the new one.
    pub fn swap(&mut self) -> Direction {
        self.direction = self.direction.swap();
        self.direction
    }

    /// Sets whether output is rounded to two decimals.
    pub fn set_rounded(&mut self, rounded: bool) {
        self.options.rounded = rounded;
    }

    /// Converts `raw` with the current settings.
    pub fn convert(&self, raw: &str) -> ConversionResult {
        convert_with(raw, self.direction, self.options, self.rate.as_ref())
    }
}
