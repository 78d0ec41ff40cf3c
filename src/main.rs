mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use propdash_core::cli::args::{Cli, Commands};
use propdash_core::config::ConfigManager;
use propdash_core::config::TelemetryConfig;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use cli::CommandContext;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let workspace = match &args.workspace {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("cannot determine current dir")?,
    };
    let manager = ConfigManager::load_with_override(args.config.as_deref(), &workspace)?;
    let context = CommandContext::new(&args, manager, workspace)?;

    let command = args.command();
    let interactive = matches!(command, Commands::Pick { .. });
    init_tracing(
        &context.config().telemetry,
        args.log_level.as_deref(),
        interactive.then_some(context.state_dir()),
    )?;

    match command {
        Commands::Pick { auto_focus } => cli::pick::handle_pick_command(&context, auto_focus).await,
        Commands::Search { query, limit } => {
            cli::search::handle_search_command(&context, &query, limit).await
        }
        Commands::Price { legs, samples } => {
            cli::price::handle_price_command(&context, &legs, samples).await
        }
        Commands::Recent { clear } => cli::recent::handle_recent_command(&context, clear),
        Commands::Config { init, force } => cli::config::handle_config_command(&context, init, force),
    }
}

/// Install the global subscriber. The picker owns the screen, so its logs go
/// to a file in the state directory instead of stderr.
fn init_tracing(
    telemetry: &TelemetryConfig,
    level_override: Option<&str>,
    log_dir: Option<&Path>,
) -> Result<()> {
    let default_level = level_override.unwrap_or(telemetry.log_level.as_str());
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level: {default_level}"))?,
    };

    match log_dir {
        Some(dir) => {
            let path = dir.join(&telemetry.log_file);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
