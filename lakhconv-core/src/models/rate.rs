//! Exchange rate snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// USD value of one INR.
///
/// Always positive and finite; construct with [`ExchangeRate::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// USD per INR.
    usd_per_inr: f64,
    /// Date the upstream feed published this rate, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    /// When this rate was obtained.
    pub fetched_at: DateTime<Utc>,
    /// Where the rate came from (endpoint URL or "manual").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ExchangeRate {
    /// Creates a rate, rejecting zero, negative, and non-finite values.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRate`] if `usd_per_inr` is not a positive
    /// finite number.
    pub fn new(usd_per_inr: f64) -> Result<Self, CoreError> {
        if !usd_per_inr.is_finite() || usd_per_inr <= 0.0 {
            return Err(CoreError::InvalidRate(usd_per_inr));
        }
        Ok(Self {
            usd_per_inr,
            as_of: None,
            fetched_at: Utc::now(),
            source: None,
        })
    }

    /// Sets the publication date.
    #[must_use]
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// Sets the source description.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// USD value of one INR.
    pub fn usd_per_inr(&self) -> f64 {
        self.usd_per_inr
    }

    /// INR value of one USD.
    pub fn inr_per_usd(&self) -> f64 {
        1.0 / self.usd_per_inr
    }

    /// Returns true if the stored value still satisfies the rate invariant.
    ///
    /// Deserialized rates bypass [`ExchangeRate::new`], so callers loading
    /// from disk should check this.
    pub fn is_valid(&self) -> bool {
        self.usd_per_inr.is_finite() && self.usd_per_inr > 0.0
    }
}

impl std::fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "1 INR = {} USD", self.usd_per_inr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_rates() {
        assert!(ExchangeRate::new(0.0).is_err());
        assert!(ExchangeRate::new(-0.012).is_err());
        assert!(ExchangeRate::new(f64::NAN).is_err());
        assert!(ExchangeRate::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_inverse_rate() {
        let rate = ExchangeRate::new(0.0125).unwrap();
        assert!((rate.inr_per_usd() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_builder_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let rate = ExchangeRate::new(0.012)
            .unwrap()
            .with_as_of(date)
            .with_source("manual");
        assert_eq!(rate.as_of, Some(date));
        assert_eq!(rate.source.as_deref(), Some("manual"));
        assert!(rate.is_valid());
    }
}
