//! Output formatting for CLI.

mod json;
mod text;

pub use json::{JsonFormatter, ShareOutput};
pub use text::{TextFormatter, on_off};
