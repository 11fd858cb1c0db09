//! Trait definitions for lakhconv.

use crate::error::CoreError;
use crate::models::ExchangeRate;

/// Source of the INR/USD exchange rate.
///
/// The conversion core never fetches rates itself; front ends obtain one
/// through an implementor of this trait and pass it in.
pub trait RateProvider: Send + Sync {
    /// Short name for logs and output.
    fn name(&self) -> &str;

    /// Fetches the current USD value of one INR.
    ///
    /// This is an async operation that may involve network requests.
    fn fetch_rate(
        &self,
    ) -> impl std::future::Future<Output = Result<ExchangeRate, CoreError>> + Send;
}

/// A rate supplied up front, e.g. from the command line.
#[derive(Debug, Clone)]
pub struct FixedRate {
    rate: ExchangeRate,
}

impl FixedRate {
    /// Creates a fixed provider.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRate`] for zero, negative, or non-finite
    /// rates.
    pub fn new(usd_per_inr: f64) -> Result<Self, CoreError> {
        Ok(Self {
            rate: ExchangeRate::new(usd_per_inr)?.with_source("manual"),
        })
    }
}

impl RateProvider for FixedRate {
    fn name(&self) -> &str {
        "manual"
    }

    async fn fetch_rate(&self) -> Result<ExchangeRate, CoreError> {
        Ok(self.rate.clone())
    }
}
