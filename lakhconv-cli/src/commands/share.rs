//! Share command - print the share text for the latest conversion.

use anyhow::Result;

use crate::context::AppContext;
use crate::output::{JsonFormatter, ShareOutput};
use crate::{Cli, OutputFormat};

/// Runs the share command.
pub async fn run(cli: &Cli, ctx: &AppContext) -> Result<()> {
    let Some(entry) = ctx.history.latest().await else {
        anyhow::bail!("Nothing to share yet. Convert an amount first.");
    };

    match cli.format {
        OutputFormat::Text => println!("{}", entry.share_text()),
        OutputFormat::Json => {
            let output = ShareOutput {
                text: entry.share_text(),
                result: entry.result.clone(),
            };
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}
