// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! lakhconv CLI - INR lakh/crore to USD K/M/B conversion from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Convert rupees to dollars with the live rate
//! lakhconv 1.5Cr
//!
//! # Convert dollars to rupees
//! lakhconv convert 2.3B --usd-to-inr
//!
//! # Unrounded output with a manual rate
//! lakhconv convert 50 lakh --exact --rate 0.012
//!
//! # Show the current rate
//! lakhconv rate
//!
//! # Recent conversions
//! lakhconv history
//!
//! # Interactive session
//! lakhconv session
//!
//! # JSON output
//! lakhconv --format json --pretty 10K --usd-to-inr
//! ```

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use lakhconv_core::CoreError;
use lakhconv_store::LogLevel;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

use commands::{config, convert, history, rate, session, share, swap};
use context::AppContext;

// ============================================================================
// CLI Definition
// ============================================================================

/// lakhconv CLI - INR/USD magnitude notation converter.
#[derive(Parser)]
#[command(name = "lakhconv")]
#[command(about = "Convert between INR lakh/crore and USD K/M/B notation")]
#[command(long_about = r#"
lakhconv converts amounts between Indian Rupee lakh/crore notation and
US Dollar thousand/million/billion notation using a live exchange rate.

Accepted suffixes:
  • Cr                 crore    (1,00,00,000)
  • L, Lakh            lakh     (1,00,000)
  • B, Billion         billion  (1,000,000,000)
  • M, Million         million  (1,000,000)
  • K, Thousand        thousand (1,000)

Examples:
  lakhconv 1.5Cr                    # INR → USD (default direction)
  lakhconv 2.3B --usd-to-inr        # USD → INR
  lakhconv 50L --exact              # Unrounded output
  lakhconv rate                     # Current exchange rate
  lakhconv session                  # Interactive mode
"#)]
#[command(version)]
#[command(author = "lakhconv Contributors")]
pub struct Cli {
    /// Subcommand to run. A bare amount runs 'convert'; nothing at all
    /// starts a session.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Conversion arguments when no subcommand is given.
    #[command(flatten)]
    pub convert: convert::ConvertArgs,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Convert an amount (default if an amount is given).
    #[command(visible_alias = "c")]
    Convert(convert::ConvertArgs),

    /// Show the current exchange rate.
    #[command(visible_alias = "r")]
    Rate(rate::RateArgs),

    /// Show or clear recent conversions.
    #[command(visible_alias = "h")]
    History(history::HistoryArgs),

    /// Print the share text for the latest conversion.
    Share,

    /// Interactive conversion session.
    #[command(visible_alias = "s")]
    Session(session::SessionArgs),

    /// Flip the default conversion direction.
    Swap,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// No exchange rate could be obtained.
    RateUnavailable = 2,
    /// Input did not produce a conversion.
    InvalidInput = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

/// Handle for swapping the log filter once settings are loaded.
type LogHandle = reload::Handle<EnvFilter, Registry>;

/// Filter directives for the given verbosity and configured level.
fn log_directives(verbose: bool, level: LogLevel) -> String {
    if verbose {
        "lakhconv=debug,info".to_string()
    } else {
        format!("lakhconv={level}")
    }
}

/// Installs the subscriber at the default level so that store loading is
/// already logged.
fn setup_logging(verbose: bool, quiet: bool) -> Option<LogHandle> {
    if quiet {
        return None; // No logging in quiet mode
    }

    let filter = EnvFilter::new(log_directives(verbose, LogLevel::default()));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    Some(handle)
}

/// Applies the configured log level. `--verbose` always wins.
fn apply_log_level(handle: &LogHandle, verbose: bool, level: LogLevel) {
    if verbose {
        return;
    }
    if let Err(e) = handle.reload(EnvFilter::new(log_directives(false, level))) {
        tracing::warn!(error = %e, "Failed to apply configured log level");
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_handle = setup_logging(cli.verbose, cli.quiet);

    let ctx = AppContext::load().await;
    if let Some(handle) = &log_handle {
        apply_log_level(handle, cli.verbose, ctx.settings.get().await.log_level);
    }

    let result = match &cli.command {
        Some(Commands::Convert(args)) => convert::run(args, &cli, &ctx).await,
        Some(Commands::Rate(args)) => rate::run(args, &cli, &ctx).await,
        Some(Commands::History(args)) => history::run(args, &cli, &ctx).await,
        Some(Commands::Share) => share::run(&cli, &ctx).await,
        Some(Commands::Session(args)) => session::run(args, &cli, &ctx).await,
        Some(Commands::Swap) => swap::run(&cli, &ctx).await,
        Some(Commands::Config(args)) => config::run(args, &cli, &ctx).await,
        None if cli.convert.amount.is_empty() => {
            // Nothing to convert: start an interactive session
            session::run(&session::SessionArgs::default(), &cli, &ctx).await
        }
        None => convert::run(&cli.convert, &cli, &ctx).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        let code = match e.downcast_ref::<CoreError>() {
            Some(CoreError::RateUnavailable(_)) => ExitCode::RateUnavailable,
            _ => ExitCode::Error,
        };
        std::process::exit(code as i32);
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = parse(&["lakhconv", "--format", "json", "history"]);
        assert!(matches!(cli.command, Some(Commands::History(_))));
        assert_eq!(cli.format, OutputFormat::Json);

        let cli = parse(&["lakhconv", "-v", "history"]);
        assert!(matches!(cli.command, Some(Commands::History(_))));
        assert!(cli.verbose);

        let cli = parse(&["lakhconv", "-q", "swap"]);
        assert!(matches!(cli.command, Some(Commands::Swap)));
        assert!(cli.quiet);

        let cli = parse(&["lakhconv", "--no-color", "config", "path"]);
        assert!(matches!(cli.command, Some(Commands::Config(_))));
        assert!(cli.no_color);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["lakhconv", "rate", "--format", "json", "--pretty"]);
        assert!(matches!(cli.command, Some(Commands::Rate(_))));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.pretty);
    }

    #[test]
    fn test_bare_amount_converts() {
        let cli = parse(&["lakhconv", "50", "lakh", "--exact"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.convert.input(), "50 lakh");
        assert!(cli.convert.exact);

        let cli = parse(&["lakhconv", "--format", "json", "--pretty", "10K", "--usd-to-inr"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.convert.input(), "10K");
        assert!(cli.convert.usd_to_inr);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_attempts_range() {
        let cli = parse(&["lakhconv", "config", "attempts", "2"]);
        assert!(matches!(cli.command, Some(Commands::Config(_))));

        assert!(Cli::try_parse_from(["lakhconv", "config", "attempts", "0"]).is_err());
        assert!(Cli::try_parse_from(["lakhconv", "config", "attempts", "11"]).is_err());
    }

    #[test]
    fn test_no_arguments_starts_session() {
        let cli = parse(&["lakhconv"]);
        assert!(cli.command.is_none());
        assert!(cli.convert.amount.is_empty());
    }

    #[test]
    fn test_log_directives() {
        assert_eq!(log_directives(false, LogLevel::default()), "lakhconv=warn");
        assert_eq!(log_directives(false, LogLevel::Debug), "lakhconv=debug");
        assert_eq!(log_directives(true, LogLevel::Error), "lakhconv=debug,info");
    }
}
