// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # lakhconv Fetch
//!
//! Exchange rate fetching for lakhconv.
//!
//! - [`host::http`] - HTTP client with tracing and domain allowlist
//! - [`rates::RateFetcher`] - currency-api client with endpoint fallback
//! - [`retry::RetryStrategy`] - per-endpoint retry with backoff
//!
//! ## Example
//!
//! ```ignore
//! use lakhconv_fetch::RateFetcher;
//!
//! let fetcher = RateFetcher::new()?;
//! let rate = fetcher.fetch().await?;
//! println!("{rate}");
//! ```

pub mod error;
pub mod host;
pub mod rates;
pub mod retry;

// Errors
pub use error::{FetchError, HttpError};

// Host APIs
pub use host::http::{HttpClient, host_of};

// Rates
pub use rates::{RateFetcher, endpoints, parse_rate_response};
pub use retry::RetryStrategy;
