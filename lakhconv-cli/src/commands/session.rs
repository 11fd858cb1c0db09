//! Session command - interactive conversion loop.
//!
//! The rate is resolved once at startup; every input line is then converted
//! with it. Lines starting with `:` are session commands.

use std::io::{Write, stdout};

use anyhow::Result;
use clap::Args;
use lakhconv_core::{ConversionResult, ConversionService, CoreError, Direction, FormattingOptions};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::context::{AppContext, RateRequest, ResolvedRate};
use crate::output::{JsonFormatter, ShareOutput, TextFormatter, on_off};
use crate::{Cli, OutputFormat};

const HELP: &str = "\
Enter an amount such as 1.5Cr, 50 lakh, 2.3B or 10K.
  :swap     flip the direction
  :round    toggle two-decimal rounding
  :rate     show the exchange rate
  :history  show recent conversions
  :clear    clear history
  :share    print the share text for the last result
  :quit     leave the session";

/// Arguments for the session command.
#[derive(Args, Default)]
pub struct SessionArgs {
    /// Start in USD → INR direction.
    #[arg(long)]
    pub usd_to_inr: bool,

    /// Start with unrounded output.
    #[arg(long)]
    pub exact: bool,

    /// Use this rate (USD per INR) instead of fetching one.
    #[arg(long, value_name = "USD_PER_INR", conflicts_with = "offline")]
    pub rate: Option<f64>,

    /// Use the cached rate without touching the network.
    #[arg(long)]
    pub offline: bool,

    /// Do not record conversions in history.
    #[arg(long)]
    pub no_history: bool,
}

// ============================================================================
// Line Parsing
// ============================================================================

/// What a single input line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Convert the amount.
    Convert(String),
    /// Flip the direction.
    Swap,
    /// Toggle rounding.
    Round,
    /// Show the rate.
    Rate,
    /// Show history.
    History,
    /// Clear history.
    Clear,
    /// Print share text.
    Share,
    /// Show help.
    Help,
    /// Leave the session.
    Quit,
    /// Blank line.
    Empty,
    /// Unrecognized `:` command.
    Unknown(String),
}

/// Parses one input line.
pub fn parse_line(line: &str) -> Action {
    let line = line.trim();
    if line.is_empty() {
        return Action::Empty;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Action::Convert(line.to_string());
    };

    match command.trim().to_lowercase().as_str() {
        "swap" | "s" => Action::Swap,
        "round" | "r" => Action::Round,
        "rate" => Action::Rate,
        "history" | "h" => Action::History,
        "clear" => Action::Clear,
        "share" => Action::Share,
        "help" | "?" => Action::Help,
        "quit" | "q" | "exit" => Action::Quit,
        other => Action::Unknown(other.to_string()),
    }
}

// ============================================================================
// Notices
// ============================================================================

/// Feedback for session commands that do not convert anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The direction changed.
    Direction(Direction),
    /// Rounding was toggled.
    Rounding(bool),
    /// History was cleared.
    HistoryCleared,
    /// `:share` before any successful conversion.
    NothingToShare,
    /// Unrecognized `:` command.
    UnknownCommand(String),
}

impl Notice {
    /// Human-readable form.
    pub fn to_text(&self, text: &TextFormatter) -> String {
        match self {
            Notice::Direction(direction) => {
                format!("Direction: {} ({})", direction.label(), direction.placeholder())
            }
            Notice::Rounding(rounded) => format!("Rounding: {}", on_off(*rounded)),
            Notice::HistoryCleared => "History cleared".to_string(),
            Notice::NothingToShare => "Nothing to share yet.".to_string(),
            Notice::UnknownCommand(command) => {
                text.format_error(&format!("Unknown command :{command}"))
            }
        }
    }

    /// JSON form, one object per notice.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Notice::Direction(direction) => serde_json::json!({ "direction": direction }),
            Notice::Rounding(rounded) => serde_json::json!({ "rounded": rounded }),
            Notice::HistoryCleared => serde_json::json!({ "historyCleared": true }),
            Notice::NothingToShare => serde_json::json!({ "error": "Nothing to share yet." }),
            Notice::UnknownCommand(command) => {
                serde_json::json!({ "error": format!("Unknown command :{command}") })
            }
        }
    }
}

fn emit(notice: &Notice, cli: &Cli, text: &TextFormatter, json: &JsonFormatter) -> Result<()> {
    match cli.format {
        OutputFormat::Text => println!("{}", notice.to_text(text)),
        OutputFormat::Json => println!("{}", json.format(&notice.to_json())?),
    }
    Ok(())
}

// ============================================================================
// Session State
// ============================================================================

/// Conversion state for one interactive session.
pub struct Session {
    service: ConversionService,
    last: Option<ConversionResult>,
}

impl Session {
    /// Creates a session.
    pub fn new(
        direction: Direction,
        options: FormattingOptions,
        rate: Option<&ResolvedRate>,
    ) -> Self {
        let mut service = ConversionService::new(direction, options);
        service.set_rate(rate.map(|r| r.rate.clone()));
        Self {
            service,
            last: None,
        }
    }

    /// The conversion service.
    pub fn service(&self) -> &ConversionService {
        &self.service
    }

    /// Converts `input` and remembers the result.
    pub fn convert(&mut self, input: &str) -> ConversionResult {
        let result = self.service.convert(input);
        self.last = Some(result.clone());
        result
    }

    /// Flips the direction and forgets the last result.
    pub fn swap(&mut self) -> Direction {
        self.last = None;
        self.service.swap()
    }

    /// Toggles rounding and returns the new state.
    pub fn toggle_rounding(&mut self) -> bool {
        let rounded = !self.service.options().rounded;
        self.service.set_rounded(rounded);
        rounded
    }

    /// The last result, if it converted. Cleared on swap.
    pub fn last_converted(&self) -> Option<&ConversionResult> {
        self.last.as_ref().filter(|r| r.is_converted())
    }

    /// Share text for the last successful result.
    pub fn share_text(&self) -> Option<String> {
        self.last_converted().map(|r| format!("Converted value: {r}"))
    }
}

// ============================================================================
// Command
// ============================================================================

/// Runs the session command.
pub async fn run(args: &SessionArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    let settings = ctx.settings.get().await;
    let text = TextFormatter::new(!cli.no_color);
    let json = JsonFormatter::new(cli.pretty);
    let interactive = cli.format == OutputFormat::Text && !cli.quiet;

    let request = RateRequest {
        manual: args.rate,
        offline: args.offline,
    };
    let resolved = match ctx
        .resolve_rate(request, |message| {
            if interactive {
                eprintln!("{}", text.format_warning(message));
            }
        })
        .await
    {
        Ok(resolved) => Some(resolved),
        Err(e) if matches!(e.downcast_ref::<CoreError>(), Some(CoreError::RateUnavailable(_))) => {
            warn!(error = %e, "Starting session without a rate");
            None
        }
        Err(e) => return Err(e),
    };

    let direction = if args.usd_to_inr {
        Direction::UsdToInr
    } else {
        settings.direction
    };
    let options = if args.exact {
        FormattingOptions::exact()
    } else {
        settings.formatting()
    };
    let record = settings.record_history && !args.no_history;

    let mut session = Session::new(direction, options, resolved.as_ref());
    info!(direction = %direction, has_rate = resolved.is_some(), "Session started");

    if interactive {
        println!("{}", text.format_rate_line(session.service().rate()));
        println!("Enter an amount, {}. Type :help for commands.", direction.placeholder());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("{}> ", session.service().direction().label());
            stdout().flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            Action::Empty => {}
            Action::Convert(input) => {
                let direction = session.service().direction();
                let result = session.convert(&input);
                if record {
                    if let Err(e) = ctx.history.record(&input, &result, direction).await {
                        warn!(error = %e, "Failed to record history");
                    }
                }
                match cli.format {
                    OutputFormat::Text if cli.quiet => println!("{}", text.format_value(&result)),
                    OutputFormat::Text => {
                        println!("{}", text.format_conversion(&input, direction, &result));
                    }
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            json.format_conversion(&input, direction, &result, resolved.as_ref())?
                        );
                    }
                }
            }
            Action::Swap => {
                let direction = session.swap();
                emit(&Notice::Direction(direction), cli, &text, &json)?;
            }
            Action::Round => {
                let rounded = session.toggle_rounding();
                emit(&Notice::Rounding(rounded), cli, &text, &json)?;
            }
            Action::Rate => match (&resolved, cli.format) {
                (Some(resolved), OutputFormat::Json) => println!("{}", json.format_rate(resolved)?),
                (Some(resolved), OutputFormat::Text) => println!("{}", text.format_rate(resolved)),
                (None, OutputFormat::Json) => {
                    println!("{}", json.format(&serde_json::json!({ "rate": null }))?);
                }
                (None, OutputFormat::Text) => println!("{}", text.format_rate_line(None)),
            },
            Action::History => {
                let entries = ctx.history.entries().await;
                match cli.format {
                    OutputFormat::Json => println!("{}", json.format(&entries)?),
                    OutputFormat::Text => println!("{}", text.format_history(&entries)),
                }
            }
            Action::Clear => {
                ctx.history.clear().await?;
                emit(&Notice::HistoryCleared, cli, &text, &json)?;
            }
            Action::Share => match (session.last_converted(), session.share_text()) {
                (Some(result), Some(share)) if cli.format == OutputFormat::Json => {
                    let output = ShareOutput {
                        text: share,
                        result: result.to_string(),
                    };
                    println!("{}", json.format(&output)?);
                }
                (_, Some(share)) => println!("{share}"),
                _ => emit(&Notice::NothingToShare, cli, &text, &json)?,
            },
            Action::Help => println!("{HELP}"),
            Action::Quit => break,
            Action::Unknown(command) => emit(&Notice::UnknownCommand(command), cli, &text, &json)?,
        }
    }

    info!("Session ended");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RateOrigin;
    use lakhconv_core::ExchangeRate;

    fn session_with_rate(rate: f64) -> Session {
        let resolved = ResolvedRate {
            rate: ExchangeRate::new(rate).unwrap(),
            origin: RateOrigin::Manual,
        };
        Session::new(Direction::InrToUsd, FormattingOptions::rounded(), Some(&resolved))
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("  1.5Cr "), Action::Convert("1.5Cr".to_string()));
        assert_eq!(parse_line(""), Action::Empty);
        assert_eq!(parse_line(":swap"), Action::Swap);
        assert_eq!(parse_line(":ROUND"), Action::Round);
        assert_eq!(parse_line(": q"), Action::Quit);
        assert_eq!(parse_line(":history"), Action::History);
        assert_eq!(parse_line(":nope"), Action::Unknown("nope".to_string()));
    }

    #[test]
    fn test_session_converts_with_rate() {
        let mut session = session_with_rate(0.012);
        assert_eq!(session.convert("1Cr").to_string(), "120.00K");
        assert_eq!(session.share_text().as_deref(), Some("Converted value: 120.00K"));
    }

    #[test]
    fn test_session_without_rate_is_invalid() {
        let mut session = Session::new(Direction::InrToUsd, FormattingOptions::rounded(), None);
        assert_eq!(session.convert("1Cr"), ConversionResult::Invalid);
        assert_eq!(session.share_text(), None);
    }

    #[test]
    fn test_swap_clears_last_result() {
        let mut session = session_with_rate(0.012);
        session.convert("1Cr");
        assert!(session.share_text().is_some());

        assert_eq!(session.swap(), Direction::UsdToInr);
        assert!(session.share_text().is_none());
        assert_eq!(session.convert("12K").to_string(), "10.00 L");
    }

    #[test]
    fn test_notice_text() {
        let text = TextFormatter::new(false);
        assert_eq!(
            Notice::Direction(Direction::UsdToInr).to_text(&text),
            "Direction: USD → INR (e.g. 2.3B or 10K)"
        );
        assert_eq!(Notice::Rounding(false).to_text(&text), "Rounding: off");
        assert_eq!(
            Notice::UnknownCommand("nope".to_string()).to_text(&text),
            "Error: Unknown command :nope"
        );
    }

    #[test]
    fn test_notice_json_objects() {
        assert_eq!(
            Notice::Direction(Direction::UsdToInr).to_json(),
            serde_json::json!({ "direction": "USD_TO_INR" })
        );
        assert_eq!(Notice::Rounding(true).to_json()["rounded"], true);
        assert_eq!(Notice::HistoryCleared.to_json()["historyCleared"], true);
        assert!(Notice::NothingToShare.to_json()["error"].is_string());
        assert!(Notice::UnknownCommand("x".to_string()).to_json().is_object());
    }

    #[test]
    fn test_toggle_rounding() {
        let mut session = session_with_rate(0.012);
        assert!(!session.toggle_rounding());
        assert_eq!(session.convert("1Cr").to_string(), "120K");
        assert!(session.toggle_rounding());
    }
}
