//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use lakhconv_core::{ConversionResult, Direction, FormattedAmount, INVALID_INPUT};
use serde::Serialize;

use crate::context::ResolvedRate;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a single conversion.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOutput {
    pub input: String,
    pub direction: Direction,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub converted: Option<f64>,
    pub result: FormattedAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<RateOutput>,
}

/// Exchange rate output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOutput {
    pub usd_per_inr: f64,
    pub inr_per_usd: f64,
    pub origin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    pub fetched_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Share text output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareOutput {
    pub text: String,
    pub result: String,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a conversion with the rate it used.
    pub fn format_conversion(
        &self,
        input: &str,
        direction: Direction,
        result: &ConversionResult,
        rate: Option<&ResolvedRate>,
    ) -> Result<String> {
        self.format(&self.conversion_to_output(input, direction, result, rate))
    }

    /// Formats an exchange rate.
    pub fn format_rate(&self, resolved: &ResolvedRate) -> Result<String> {
        self.format(&self.rate_to_output(resolved))
    }

    /// Converts a conversion result to output.
    fn conversion_to_output(
        &self,
        input: &str,
        direction: Direction,
        result: &ConversionResult,
        rate: Option<&ResolvedRate>,
    ) -> ConversionOutput {
        let (status, amount, converted, formatted) = match result {
            ConversionResult::Converted {
                amount,
                converted,
                formatted,
            } => ("converted", Some(*amount), Some(*converted), formatted.clone()),
            ConversionResult::Invalid => (
                "invalid",
                None,
                None,
                FormattedAmount::Text(INVALID_INPUT.to_string()),
            ),
        };

        ConversionOutput {
            input: input.to_string(),
            direction,
            status: status.to_string(),
            amount,
            converted,
            result: formatted,
            rate: rate.map(|r| self.rate_to_output(r)),
        }
    }

    /// Converts a resolved rate to output.
    fn rate_to_output(&self, resolved: &ResolvedRate) -> RateOutput {
        let rate = &resolved.rate;
        RateOutput {
            usd_per_inr: rate.usd_per_inr(),
            inr_per_usd: rate.inr_per_usd(),
            origin: resolved.origin.to_string(),
            as_of: rate.as_of,
            fetched_at: rate.fetched_at,
            source: rate.source.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
