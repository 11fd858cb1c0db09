//! Swap command - flip the default conversion direction.

use anyhow::Result;
use tracing::info;

use crate::context::AppContext;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Runs the swap command.
pub async fn run(cli: &Cli, ctx: &AppContext) -> Result<()> {
    let direction = ctx.settings.swap_direction().await;
    ctx.settings.save().await?;
    info!(direction = %direction, "Default direction swapped");

    match cli.format {
        OutputFormat::Text => {
            if !cli.quiet {
                println!("Direction: {}", direction.label());
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&serde_json::json!({ "direction": direction }))?);
        }
    }

    Ok(())
}
