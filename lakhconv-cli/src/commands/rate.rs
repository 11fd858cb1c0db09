//! Rate command - show the current exchange rate.

use anyhow::Result;
use clap::Args;

use crate::context::{AppContext, RateRequest};
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the rate command.
#[derive(Args, Default)]
pub struct RateArgs {
    /// Show the cached rate without touching the network.
    #[arg(long)]
    pub offline: bool,
}

/// Runs the rate command.
pub async fn run(args: &RateArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    let formatter = TextFormatter::new(!cli.no_color);

    let request = RateRequest {
        manual: None,
        offline: args.offline,
    };
    let resolved = ctx
        .resolve_rate(request, |message| {
            if !cli.quiet && cli.format == OutputFormat::Text {
                eprintln!("{}", formatter.format_warning(message));
            }
        })
        .await?;

    match cli.format {
        OutputFormat::Text => {
            if cli.quiet {
                println!("{}", resolved.rate.usd_per_inr());
            } else {
                println!("{}", formatter.format_rate(&resolved));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_rate(&resolved)?);
        }
    }

    Ok(())
}
