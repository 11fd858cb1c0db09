//! Convert command - convert a single amount.

use anyhow::Result;
use clap::Args;
use lakhconv_core::{ConversionResult, Direction, FormattingOptions, convert_with};
use lakhconv_store::Settings;
use tracing::{debug, warn};

use crate::context::{AppContext, RateRequest, ResolvedRate};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the convert command.
#[derive(Args, Default)]
pub struct ConvertArgs {
    /// Amount to convert, e.g. "1.5Cr", "50 lakh", "2.3B".
    /// Words are joined with spaces, so quoting is optional.
    #[arg(value_name = "AMOUNT")]
    pub amount: Vec<String>,

    /// Convert dollars to rupees.
    #[arg(long, conflicts_with = "inr_to_usd")]
    pub usd_to_inr: bool,

    /// Convert rupees to dollars.
    #[arg(long)]
    pub inr_to_usd: bool,

    /// Show unrounded output.
    #[arg(long)]
    pub exact: bool,

    /// Use this rate (USD per INR) instead of fetching one.
    #[arg(long, value_name = "USD_PER_INR", conflicts_with = "offline")]
    pub rate: Option<f64>,

    /// Use the cached rate without touching the network.
    #[arg(long)]
    pub offline: bool,

    /// Do not record this conversion in history.
    #[arg(long)]
    pub no_history: bool,
}

impl ConvertArgs {
    /// The amount as typed.
    pub fn input(&self) -> String {
        self.amount.join(" ")
    }

    /// Direction from flags, falling back to the configured default.
    pub fn direction(&self, settings: &Settings) -> Direction {
        if self.usd_to_inr {
            Direction::UsdToInr
        } else if self.inr_to_usd {
            Direction::InrToUsd
        } else {
            settings.direction
        }
    }

    /// Formatting options from flags and settings.
    pub fn formatting(&self, settings: &Settings) -> FormattingOptions {
        if self.exact {
            FormattingOptions::exact()
        } else {
            settings.formatting()
        }
    }

    /// Where to take the rate from.
    pub fn rate_request(&self) -> RateRequest {
        RateRequest {
            manual: self.rate,
            offline: self.offline,
        }
    }
}

/// Runs the convert command.
pub async fn run(args: &ConvertArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    let input = args.input();
    if input.trim().is_empty() {
        anyhow::bail!("No amount given. Try: lakhconv convert 1.5Cr");
    }

    let settings = ctx.settings.get().await;
    let direction = args.direction(&settings);
    let options = args.formatting(&settings);

    let resolved = ctx
        .resolve_rate(args.rate_request(), |message| {
            if !cli.quiet && cli.format == OutputFormat::Text {
                eprintln!("{}", TextFormatter::new(!cli.no_color).format_warning(message));
            }
        })
        .await?;

    let result = convert_with(&input, direction, options, Some(&resolved.rate));
    debug!(input = %input, direction = %direction, result = %result, "Converted");

    if settings.record_history && !args.no_history {
        if let Err(e) = ctx.history.record(&input, &result, direction).await {
            warn!(error = %e, "Failed to record history");
        }
    }

    output_result(&input, direction, &result, &resolved, cli)?;

    if !result.is_converted() {
        std::process::exit(ExitCode::InvalidInput as i32);
    }

    Ok(())
}

/// Outputs a conversion in the appropriate format.
fn output_result(
    input: &str,
    direction: Direction,
    result: &ConversionResult,
    resolved: &ResolvedRate,
    cli: &Cli,
) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            if cli.quiet {
                println!("{}", formatter.format_value(result));
            } else {
                println!("{}", formatter.format_conversion(input, direction, result));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = formatter.format_conversion(input, direction, result, Some(resolved))?;
            println!("{output}");
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn args(amount: &[&str]) -> ConvertArgs {
        ConvertArgs {
            amount: amount.iter().map(|s| (*s).to_string()).collect(),
            ..ConvertArgs::default()
        }
    }

    #[test]
    fn test_input_joins_words() {
        assert_eq!(args(&["50", "lakh"]).input(), "50 lakh");
        assert_eq!(args(&["1.5Cr"]).input(), "1.5Cr");
    }

    #[test]
    fn test_direction_flags_override_settings() {
        let settings = Settings::default();
        assert_eq!(args(&["1"]).direction(&settings), Direction::InrToUsd);

        let mut usd = args(&["1"]);
        usd.usd_to_inr = true;
        assert_eq!(usd.direction(&settings), Direction::UsdToInr);

        let swapped = Settings {
            direction: Direction::UsdToInr,
            ..Settings::default()
        };
        let mut inr = args(&["1"]);
        inr.inr_to_usd = true;
        assert_eq!(inr.direction(&swapped), Direction::InrToUsd);
        assert_eq!(args(&["1"]).direction(&swapped), Direction::UsdToInr);
    }

    #[test]
    fn test_exact_overrides_rounding() {
        let settings = Settings::default();
        assert!(args(&["1"]).formatting(&settings).rounded);

        let mut exact = args(&["1"]);
        exact.exact = true;
        assert!(!exact.formatting(&settings).rounded);
    }

    #[test]
    fn test_rate_request() {
        let mut a = args(&["1"]);
        a.rate = Some(0.012);
        assert_eq!(
            a.rate_request(),
            RateRequest {
                manual: Some(0.012),
                offline: false,
            }
        );
    }
}
