//! Text output formatting with colors.

use lakhconv_core::{ConversionResult, Direction, ExchangeRate, HistoryEntry};
use lakhconv_store::Settings;

use crate::context::{RateOrigin, ResolvedRate};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a conversion: `1Cr INR = 120.00K USD`.
    pub fn format_conversion(
        &self,
        input: &str,
        direction: Direction,
        result: &ConversionResult,
    ) -> String {
        match result {
            ConversionResult::Converted { formatted, .. } => format!(
                "{} {} = {} {}",
                input.trim(),
                self.dim(direction.source().code()),
                self.green(&self.bold(&formatted.to_string())),
                self.dim(direction.target().code())
            ),
            ConversionResult::Invalid => self.red(&result.to_string()),
        }
    }

    /// Formats just the converted value, for quiet mode.
    pub fn format_value(&self, result: &ConversionResult) -> String {
        result.to_string()
    }

    /// Formats the exchange rate in both directions.
    pub fn format_rate(&self, resolved: &ResolvedRate) -> String {
        let rate = &resolved.rate;
        let mut lines = vec![
            format!("1 INR = {} USD", self.bold(&format!("{:.6}", rate.usd_per_inr()))),
            format!("1 USD = {} INR", self.bold(&format!("{:.2}", rate.inr_per_usd()))),
        ];

        let mut details = vec![self.format_origin(resolved.origin)];
        if let Some(as_of) = rate.as_of {
            details.push(format!("as of {}", as_of.format("%Y-%m-%d")));
        }
        lines.push(self.dim(&details.join(", ")));

        lines.join("\n")
    }

    /// Short one-line rate description for the session banner.
    pub fn format_rate_line(&self, rate: Option<&ExchangeRate>) -> String {
        match rate {
            Some(rate) => format!("Rate: {}", self.cyan(&rate.to_string())),
            None => format!("Rate: {}", self.yellow("unavailable")),
        }
    }

    /// Formats the history list, newest first.
    pub fn format_history(&self, entries: &[HistoryEntry]) -> String {
        if entries.is_empty() {
            return self.dim("No conversions yet");
        }

        let mut lines = Vec::new();
        lines.push(self.bold("Recent conversions"));
        lines.push("─".repeat(40));

        for entry in entries {
            lines.push(format!(
                "{}  {:<10} {} → {}",
                self.dim(&entry.date.format("%Y-%m-%d").to_string()),
                entry.direction.label(),
                entry.input,
                self.green(&entry.result)
            ));
        }

        lines.join("\n")
    }

    /// Formats settings for `config show`.
    pub fn format_settings(&self, settings: &Settings) -> String {
        let endpoint = settings.rate_endpoint.as_deref().unwrap_or("default");
        let lines = [
            self.bold("lakhconv Configuration"),
            "─".repeat(40),
            String::new(),
            format!("Direction:       {}", settings.direction.label()),
            format!("Rounded output:  {}", on_off(settings.rounded)),
            format!("Record history:  {}", on_off(settings.record_history)),
            format!("Rate endpoint:   {endpoint}"),
            format!("Request timeout: {}s", settings.request_timeout().as_secs()),
            format!("Fetch attempts:  {}", settings.fetch_attempts()),
            format!("Log level:       {}", settings.log_level),
        ];
        lines.join("\n")
    }

    /// Formats an error message.
    pub fn format_error(&self, error: &str) -> String {
        format!("{}: {}", self.red("Error"), error)
    }

    /// Formats a warning message.
    pub fn format_warning(&self, message: &str) -> String {
        self.yellow(message)
    }

    fn format_origin(&self, origin: RateOrigin) -> String {
        match origin {
            RateOrigin::Live => "live".to_string(),
            RateOrigin::Manual => "manual".to_string(),
            RateOrigin::Cached => self.yellow("cached"),
        }
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// `on` or `off`.
pub fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_respects_color_flag() {
        assert_eq!(TextFormatter::new(false).red("x"), "x");
        assert_eq!(TextFormatter::new(true).red("x"), format!("{RED}x{RESET}"));
    }

    #[test]
    fn test_origin_highlights_cache() {
        let formatter = TextFormatter::new(true);
        assert!(formatter.format_origin(RateOrigin::Cached).contains(YELLOW));
        assert_eq!(formatter.format_origin(RateOrigin::Live), "live");
    }

    #[test]
    fn test_on_off() {
        assert_eq!(on_off(true), "on");
        assert_eq!(on_off(false), "off");
    }
}
