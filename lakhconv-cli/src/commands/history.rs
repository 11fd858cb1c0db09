//! History command - show or clear recent conversions.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use crate::context::AppContext;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the history command.
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub action: Option<HistoryAction>,
}

/// History subcommands.
#[derive(Subcommand, Clone, Copy)]
pub enum HistoryAction {
    /// List recent conversions, newest first (default).
    List,

    /// Delete all recorded conversions.
    Clear,
}

/// Runs the history command.
pub async fn run(args: &HistoryArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    match args.action.unwrap_or(HistoryAction::List) {
        HistoryAction::List => list(cli, ctx).await,
        HistoryAction::Clear => clear(cli, ctx).await,
    }
}

async fn list(cli: &Cli, ctx: &AppContext) -> Result<()> {
    let entries = ctx.history.entries().await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_history(&entries));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&entries)?);
        }
    }

    Ok(())
}

async fn clear(cli: &Cli, ctx: &AppContext) -> Result<()> {
    let count = ctx.history.len().await;
    ctx.history.clear().await?;
    info!(count, "History cleared");

    if !cli.quiet {
        match cli.format {
            OutputFormat::Text => println!("History cleared"),
            OutputFormat::Json => {
                let formatter = JsonFormatter::new(cli.pretty);
                println!("{}", formatter.format(&serde_json::json!({ "cleared": count }))?);
            }
        }
    }

    Ok(())
}
