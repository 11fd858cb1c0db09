//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use lakhconv_core::Direction;
use lakhconv_store::{StateFile, default_config_dir};
use tracing::info;

use crate::context::AppContext;
use crate::output::{JsonFormatter, TextFormatter, on_off};
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// On/off switch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    /// Enable.
    On,
    /// Disable.
    Off,
}

impl Toggle {
    fn enabled(self) -> bool {
        self == Toggle::On
    }
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show configuration paths.
    Path,

    /// Turn two-decimal rounding on or off.
    Rounding {
        /// on or off.
        state: Toggle,
    },

    /// Turn history recording on or off.
    History {
        /// on or off.
        state: Toggle,
    },

    /// Set the default direction.
    Direction {
        /// inr-to-usd or usd-to-inr.
        direction: Direction,
    },

    /// Set a custom rate endpoint, or restore the default when omitted.
    Endpoint {
        /// Endpoint URL returning the currency-api INR document.
        url: Option<String>,
    },

    /// Set how many times each rate endpoint is tried.
    Attempts {
        /// Attempts per endpoint (1-10).
        #[arg(value_parser = clap::value_parser!(u32).range(1..=10))]
        count: u32,
    },

    /// Reset to defaults.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli, ctx: &AppContext) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli, ctx).await,
        ConfigAction::Path => show_paths(cli, ctx),
        ConfigAction::Rounding { state } => set_rounding(*state, ctx).await,
        ConfigAction::History { state } => set_history(*state, ctx).await,
        ConfigAction::Direction { direction } => set_direction(*direction, ctx).await,
        ConfigAction::Endpoint { url } => set_endpoint(url.clone(), ctx).await,
        ConfigAction::Attempts { count } => set_attempts(*count, ctx).await,
        ConfigAction::Reset => reset_config(ctx).await,
    }
}

async fn show_config(cli: &Cli, ctx: &AppContext) -> Result<()> {
    let settings = ctx.settings.get().await;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_settings(&settings));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = formatter.format(&settings)?;
            println!("{output}");
        }
    }

    Ok(())
}

fn show_paths(cli: &Cli, ctx: &AppContext) -> Result<()> {
    let config_dir = default_config_dir();
    let files = StateFile::ALL.map(|file| {
        let path = match file {
            StateFile::Settings => ctx.settings.path(),
            StateFile::History => ctx.history.path(),
            StateFile::RateCache => ctx.cache.path(),
        };
        (file, path.display().to_string())
    });

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("{:<15}{}", "Config dir:", config_dir.display());
            for (file, path) in &files {
                println!("{:<15}{path}", format!("{}:", file.label()));
            }
        }
        OutputFormat::Json => {
            let mut paths = serde_json::Map::new();
            paths.insert("config_dir".into(), config_dir.display().to_string().into());
            for (file, path) in files {
                let key = file.file_name().trim_end_matches(".json");
                paths.insert(key.into(), path.into());
            }
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&paths)?);
        }
    }

    Ok(())
}

async fn set_rounding(state: Toggle, ctx: &AppContext) -> Result<()> {
    ctx.settings.set_rounded(state.enabled()).await;
    ctx.settings.save().await?;

    info!(rounded = state.enabled(), "Rounding updated");
    println!("Rounding: {}", on_off(state.enabled()));

    Ok(())
}

async fn set_history(state: Toggle, ctx: &AppContext) -> Result<()> {
    ctx.settings.set_record_history(state.enabled()).await;
    ctx.settings.save().await?;

    info!(record_history = state.enabled(), "History recording updated");
    println!("History recording: {}", on_off(state.enabled()));

    Ok(())
}

async fn set_direction(direction: Direction, ctx: &AppContext) -> Result<()> {
    ctx.settings.set_direction(direction).await;
    ctx.settings.save().await?;

    info!(direction = %direction, "Default direction updated");
    println!("Direction: {}", direction.label());

    Ok(())
}

async fn set_endpoint(url: Option<String>, ctx: &AppContext) -> Result<()> {
    if let Some(url) = &url {
        lakhconv_fetch::host_of(url)?;
    }

    ctx.settings.set_rate_endpoint(url.clone()).await;
    ctx.settings.save().await?;

    info!(endpoint = ?url, "Rate endpoint updated");
    match url {
        Some(url) => println!("Rate endpoint set to: {url}"),
        None => println!("Rate endpoint restored to default"),
    }

    Ok(())
}

async fn set_attempts(count: u32, ctx: &AppContext) -> Result<()> {
    ctx.settings.set_fetch_attempts(count).await;
    ctx.settings.save().await?;

    info!(attempts = count, "Fetch attempts updated");
    println!("Fetch attempts: {count}");

    Ok(())
}

async fn reset_config(ctx: &AppContext) -> Result<()> {
    if ctx.settings.reset().await? {
        info!(path = %ctx.settings.path().display(), "Settings reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
