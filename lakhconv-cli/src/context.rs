//! Shared state for CLI commands.
//!
//! Bundles the settings store, history store, and rate cache, and resolves
//! the exchange rate a command should use.

use anyhow::Result;
use lakhconv_core::{CoreError, ExchangeRate, FixedRate, RateProvider};
use lakhconv_fetch::{RateFetcher, RetryStrategy};
use lakhconv_store::{HistoryStore, RateCache, Settings, SettingsStore};
use tracing::{debug, info, warn};

/// Message shown when the live rate cannot be fetched.
pub const FETCH_FAILED: &str = "Failed to fetch exchange rate.";

// ============================================================================
// Rate Resolution
// ============================================================================

/// Where a command should take its rate from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateRequest {
    /// Rate given on the command line (USD per INR).
    pub manual: Option<f64>,
    /// Skip the network and use the cached rate.
    pub offline: bool,
}

/// Where the resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOrigin {
    /// Supplied on the command line.
    Manual,
    /// Fetched from the rate feed just now.
    Live,
    /// Loaded from the local cache.
    Cached,
}

impl std::fmt::Display for RateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateOrigin::Manual => write!(f, "manual"),
            RateOrigin::Live => write!(f, "live"),
            RateOrigin::Cached => write!(f, "cached"),
        }
    }
}

/// A rate together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRate {
    /// The rate.
    pub rate: ExchangeRate,
    /// Where it came from.
    pub origin: RateOrigin,
}

/// Asks a provider for its rate.
async fn fetch_from<P: RateProvider>(provider: &P) -> Result<ExchangeRate, CoreError> {
    debug!(provider = provider.name(), "Requesting exchange rate");
    provider.fetch_rate().await
}

// ============================================================================
// App Context
// ============================================================================

/// State shared by every command.
pub struct AppContext {
    /// User settings.
    pub settings: SettingsStore,
    /// Conversion history.
    pub history: HistoryStore,
    /// Last fetched rate.
    pub cache: RateCache,
}

impl AppContext {
    /// Creates a context from explicit stores.
    pub fn new(settings: SettingsStore, history: HistoryStore, cache: RateCache) -> Self {
        Self {
            settings,
            history,
            cache,
        }
    }

    /// Loads all stores from their default locations.
    pub async fn load() -> Self {
        Self::new(
            SettingsStore::load_default().await,
            HistoryStore::load_default().await,
            RateCache::at_default_path(),
        )
    }

    /// Resolves the rate for a command.
    ///
    /// A manual rate wins. Offline requests use the cache only. Otherwise the
    /// live feed is tried first and the cache is the fallback; `notify` is
    /// called with [`FETCH_FAILED`] when that fallback kicks in.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRate`] for a bad manual rate and
    /// [`CoreError::RateUnavailable`] when no rate can be obtained.
    pub async fn resolve_rate(
        &self,
        request: RateRequest,
        notify: impl FnOnce(&str),
    ) -> Result<ResolvedRate> {
        if let Some(value) = request.manual {
            let provider = FixedRate::new(value)?;
            let rate = fetch_from(&provider).await?;
            return Ok(ResolvedRate {
                rate,
                origin: RateOrigin::Manual,
            });
        }

        if request.offline {
            return self
                .cached_rate()
                .await
                .ok_or_else(|| CoreError::RateUnavailable("no cached rate".to_string()).into());
        }

        let settings = self.settings.get().await;
        match self.fetch_live(&settings).await {
            Ok(rate) => {
                if let Err(e) = self.cache.store(&rate).await {
                    warn!(error = %e, "Failed to cache exchange rate");
                }
                Ok(ResolvedRate {
                    rate,
                    origin: RateOrigin::Live,
                })
            }
            Err(e) => {
                warn!(error = %e, "Live rate fetch failed");
                notify(FETCH_FAILED);
                match self.cached_rate().await {
                    Some(resolved) => {
                        info!("Using cached exchange rate");
                        Ok(resolved)
                    }
                    None => Err(e.into()),
                }
            }
        }
    }

    /// Fetches from the feed configured in `settings`.
    async fn fetch_live(&self, settings: &Settings) -> Result<ExchangeRate, CoreError> {
        let mut fetcher = RateFetcher::with_timeout(settings.request_timeout())?
            .with_retry_strategy(RetryStrategy::new(settings.fetch_attempts()));
        if let Some(endpoint) = &settings.rate_endpoint {
            fetcher = fetcher.with_primary_endpoint(endpoint.clone())?;
        }
        fetch_from(&fetcher).await
    }

    async fn cached_rate(&self) -> Option<ResolvedRate> {
        self.cache.load().await.map(|rate| ResolvedRate {
            rate,
            origin: RateOrigin::Cached,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context_in(dir: &TempDir) -> AppContext {
        AppContext::new(
            SettingsStore::new(dir.path().join("settings.json")),
            HistoryStore::new(dir.path().join("history.json")),
            RateCache::new(dir.path().join("rate_cache.json")),
        )
    }

    #[tokio::test]
    async fn test_manual_rate_wins() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);

        let request = RateRequest {
            manual: Some(0.012),
            offline: true,
        };
        let resolved = ctx.resolve_rate(request, |_| {}).await.unwrap();

        assert_eq!(resolved.origin, RateOrigin::Manual);
        assert_eq!(resolved.rate.usd_per_inr(), 0.012);
    }

    #[tokio::test]
    async fn test_invalid_manual_rate_rejected() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);

        let request = RateRequest {
            manual: Some(0.0),
            offline: false,
        };
        let err = ctx.resolve_rate(request, |_| {}).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::InvalidRate(_))
        ));
    }

    #[tokio::test]
    async fn test_offline_uses_cache() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);
        ctx.cache.store(&ExchangeRate::new(0.0119).unwrap()).await.unwrap();

        let request = RateRequest {
            manual: None,
            offline: true,
        };
        let resolved = ctx.resolve_rate(request, |_| {}).await.unwrap();

        assert_eq!(resolved.origin, RateOrigin::Cached);
        assert_eq!(resolved.rate.usd_per_inr(), 0.0119);
    }

    #[tokio::test]
    async fn test_offline_without_cache_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let ctx = context_in(&dir);

        let request = RateRequest {
            manual: None,
            offline: true,
        };
        let err = ctx.resolve_rate(request, |_| {}).await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::RateUnavailable(_))
        ));
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(RateOrigin::Manual.to_string(), "manual");
        assert_eq!(RateOrigin::Live.to_string(), "live");
        assert_eq!(RateOrigin::Cached.to_string(), "cached");
    }
}
