//! Exchange rate fetching from the free currency-api feed.
//!
//! The feed publishes one JSON document per base currency:
//!
//! ```json
//! { "date": "2024-05-01", "inr": { "usd": 0.01199, "eur": 0.01121, ... } }
//! ```
//!
//! The rate used for conversions is `inr.usd`. Endpoints are tried in order
//! and each one is retried on transient failures.

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use lakhconv_core::{CoreError, ExchangeRate, RateProvider};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::FetchError;
use crate::host::http::{DEFAULT_TIMEOUT_SECS, HttpClient, ResponseExt, host_of};
use crate::retry::RetryStrategy;

// ============================================================================
// Endpoints
// ============================================================================

/// Known rate feed endpoints.
pub mod endpoints {
    /// jsDelivr CDN mirror (primary).
    pub const JSDELIVR: &str =
        "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/inr.json";
    /// Cloudflare Pages mirror (fallback).
    pub const PAGES_DEV: &str = "https://latest.currency-api.pages.dev/v1/currencies/inr.json";

    /// Domains the default fetcher may contact.
    pub const ALLOWED_DOMAINS: &[&str] = &["cdn.jsdelivr.net", "currency-api.pages.dev"];

    /// Default endpoints in priority order.
    pub fn defaults() -> Vec<String> {
        vec![JSDELIVR.to_string(), PAGES_DEV.to_string()]
    }
}

/// Key of the base currency object in the feed.
const BASE_KEY: &str = "inr";
/// Key of the quote currency inside the base object.
const QUOTE_KEY: &str = "usd";

// ============================================================================
// Response Types
// ============================================================================

/// Response body of a currency-api document.
#[derive(Debug, Deserialize)]
struct CurrencyApiResponse {
    date: Option<String>,
    #[serde(flatten)]
    rates: HashMap<String, Value>,
}

// ============================================================================
// Rate Fetcher
// ============================================================================

/// Fetches the INR → USD rate, falling back across endpoints.
#[derive(Debug, Clone)]
pub struct RateFetcher {
    client: HttpClient,
    endpoints: Vec<String>,
    retry: RetryStrategy,
}

impl RateFetcher {
    /// Creates a fetcher for the default endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a fetcher for the default endpoints with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let allowed = endpoints::ALLOWED_DOMAINS
            .iter()
            .map(|d| (*d).to_string())
            .collect();
        let client = HttpClient::with_timeout(timeout)?.with_allowed_domains(allowed);

        Ok(Self::with_client(client, endpoints::defaults()))
    }

    /// Creates a fetcher with a custom client and endpoint list.
    pub fn with_client(client: HttpClient, endpoints: Vec<String>) -> Self {
        Self {
            client,
            endpoints,
            retry: RetryStrategy::default(),
        }
    }

    /// Puts `url` ahead of the configured endpoints and allows its host.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is not a valid absolute URL.
    pub fn with_primary_endpoint(mut self, url: impl Into<String>) -> Result<Self, FetchError> {
        let url = url.into();
        let host = host_of(&url)?;
        self.client.allow_domain(host);
        self.endpoints.retain(|e| *e != url);
        self.endpoints.insert(0, url);
        Ok(self)
    }

    /// Sets the retry strategy used per endpoint.
    #[must_use]
    pub fn with_retry_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.retry = strategy;
        self
    }

    /// Configured endpoints, in the order they are tried.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Fetches the rate, trying each endpoint in order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::AllEndpointsFailed`] with the last failure if no
    /// endpoint produced a valid rate.
    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<ExchangeRate, FetchError> {
        let mut last_error = None;

        for url in &self.endpoints {
            match self.fetch_with_retry(url).await {
                Ok(rate) => {
                    info!(url = %url, usd_per_inr = rate.usd_per_inr(), "Exchange rate fetched");
                    return Ok(rate);
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Rate endpoint failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.map_or(FetchError::NoEndpoints, |e| {
            FetchError::AllEndpointsFailed(Box::new(e))
        }))
    }

    /// Fetches from one endpoint, retrying transient failures.
    async fn fetch_with_retry(&self, url: &str) -> Result<ExchangeRate, FetchError> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            debug!(url = %url, attempt, "Requesting exchange rate");

            match self.fetch_once(url).await {
                Ok(rate) => return Ok(rate),
                Err(e) if self.retry.should_retry(attempt, &e) => {
                    let delay = match &e {
                        FetchError::RateLimited {
                            retry_after: Some(secs),
                        } => Duration::from_secs(*secs)
                            .min(Duration::from_millis(self.retry.max_delay_ms)),
                        _ => self.retry.delay_for_attempt(attempt),
                    };
                    warn!(
                        error = %e,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Rate request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Single request to one endpoint.
    async fn fetch_once(&self, url: &str) -> Result<ExchangeRate, FetchError> {
        let response = self.client.get(url).await?;

        if response.is_rate_limited() {
            return Err(FetchError::RateLimited {
                retry_after: response.retry_after_secs(),
            });
        }
        if !response.status().is_success() {
            return Err(FetchError::InvalidResponse(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(e.into()))?;
        let rate = parse_rate_response(&body)?;
        Ok(rate.with_source(url))
    }
}

impl RateProvider for RateFetcher {
    fn name(&self) -> &str {
        "currency-api"
    }

    async fn fetch_rate(&self) -> Result<ExchangeRate, CoreError> {
        Ok(self.fetch().await?)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parses a currency-api document into a validated rate.
///
/// # Errors
///
/// Returns an error if the body is not JSON, lacks `inr.usd`, or the rate is
/// not a positive finite number.
pub fn parse_rate_response(body: &str) -> Result<ExchangeRate, FetchError> {
    let data: CurrencyApiResponse = serde_json::from_str(body)?;

    let usd_per_inr = data
        .rates
        .get(BASE_KEY)
        .and_then(|base| base.get(QUOTE_KEY))
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            FetchError::InvalidResponse(format!("missing {BASE_KEY}.{QUOTE_KEY} in rate feed"))
        })?;

    let mut rate = ExchangeRate::new(usd_per_inr)?;

    match data.date.as_deref().map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d")) {
        Some(Ok(date)) => rate = rate.with_as_of(date),
        Some(Err(e)) => debug!(error = %e, "Ignoring unparseable feed date"),
        None => {}
    }

    Ok(rate)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_response() {
        let body = r#"{"date":"2024-05-01","inr":{"usd":0.01199,"eur":0.01121}}"#;
        let rate = parse_rate_response(body).unwrap();
        assert_eq!(rate.usd_per_inr(), 0.01199);
        assert_eq!(rate.as_of, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_parse_without_date() {
        let rate = parse_rate_response(r#"{"inr":{"usd":0.012}}"#).unwrap();
        assert!(rate.as_of.is_none());
    }

    #[test]
    fn test_parse_bad_date_is_ignored() {
        let rate = parse_rate_response(r#"{"date":"yesterday","inr":{"usd":0.012}}"#).unwrap();
        assert!(rate.as_of.is_none());
    }

    #[test]
    fn test_parse_missing_quote() {
        let err = parse_rate_response(r#"{"date":"2024-05-01","inr":{"eur":0.011}}"#).unwrap_err();
        assert!(matches!(err, FetchError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_rejects_invalid_rate() {
        let err = parse_rate_response(r#"{"inr":{"usd":0}}"#).unwrap_err();
        assert!(matches!(err, FetchError::Core(CoreError::InvalidRate(_))));

        let err = parse_rate_response(r#"{"inr":{"usd":"0.012"}}"#).unwrap_err();
        assert!(matches!(err, FetchError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_not_json() {
        assert!(matches!(parse_rate_response("<html>"), Err(FetchError::Json(_))));
    }

    #[test]
    fn test_default_endpoints() {
        let fetcher = RateFetcher::new().unwrap();
        assert_eq!(fetcher.endpoints(), endpoints::defaults().as_slice());
    }

    #[test]
    fn test_primary_endpoint_goes_first() {
        let fetcher = RateFetcher::new()
            .unwrap()
            .with_primary_endpoint(endpoints::PAGES_DEV)
            .unwrap();
        assert_eq!(fetcher.endpoints()[0], endpoints::PAGES_DEV);
        assert_eq!(fetcher.endpoints().len(), 2);

        let fetcher = fetcher.with_primary_endpoint("https://rates.example.com/inr.json").unwrap();
        assert_eq!(fetcher.endpoints().len(), 3);
    }

    #[test]
    fn test_primary_endpoint_rejects_bad_url() {
        let result = RateFetcher::new().unwrap().with_primary_endpoint("not a url");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_no_endpoints() {
        let client = HttpClient::new().unwrap();
        let fetcher = RateFetcher::with_client(client, Vec::new());
        assert!(matches!(fetcher.fetch().await, Err(FetchError::NoEndpoints)));
    }
}
