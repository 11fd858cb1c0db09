//! CLI command implementations.

pub mod config;
pub mod convert;
pub mod history;
pub mod rate;
pub mod session;
pub mod share;
pub mod swap;
