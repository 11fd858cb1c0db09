//! Host APIs for system interactions.
//!
//! - [`http`] - HTTP client with tracing and domain allowlist

pub mod http;
