//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for rate fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP layer failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Rate limited by the rate feed.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after: Option<u64>,
    },

    /// Unexpected status or body from the rate feed.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] lakhconv_core::CoreError),

    /// No endpoints configured.
    #[error("No rate endpoints configured")]
    NoEndpoints,

    /// Every endpoint failed; holds the last error.
    #[error("All rate endpoints failed: {0}")]
    AllEndpointsFailed(Box<FetchError>),
}

impl FetchError {
    /// Returns true if a later attempt might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(HttpError::Request(e)) => e.is_connect() || e.is_timeout(),
            FetchError::Http(HttpError::Timeout) | FetchError::RateLimited { .. } => true,
            FetchError::AllEndpointsFailed(inner) => inner.is_transient(),
            _ => false,
        }
    }
}

impl From<FetchError> for lakhconv_core::CoreError {
    fn from(err: FetchError) -> Self {
        lakhconv_core::CoreError::RateUnavailable(err.to_string())
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Timeout.
    #[error("Request timed out")]
    Timeout,
}
