//! XAU/USD signal fusion monitor.

mod cli;
mod cycle;
mod scheduler;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use signal_config::load_config;
use signal_monitor::setup_logging;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::ValidateConfig = cli.command {
        let level = cli.log_level.map_or("warn", |l| l.as_str());
        let _guard = setup_logging(level, cli.json_logs, None, true);
        return cli::commands::validate::run(&cli.config).await;
    }

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    // Setup logging
    let level = cli
        .log_level
        .map_or(config.logging.level.as_str(), |l| l.as_str());
    let json = cli.json_logs || config.logging.format == "json";
    let console = !matches!(cli.command, Commands::Watch(_));
    let _guard = setup_logging(
        level,
        json,
        config.logging.file.as_deref().map(Path::new),
        console,
    );

    // Execute command
    match cli.command {
        Commands::Once(args) => cli::commands::once::run(args, &config).await,
        Commands::Run(args) => cli::commands::run::run(args, &config).await,
        Commands::Watch(args) => cli::commands::watch::run(args, &config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
