//! Periodic refresh command.

use anyhow::Result;
use signal_config::AppConfig;
use std::time::Duration;
use tracing::{info, warn};

use super::print_report;
use crate::cli::RunArgs;
use crate::cycle::RefreshCycle;
use crate::scheduler::{ctrl_c, run_schedule};

pub async fn run(args: RunArgs, config: &AppConfig) -> Result<()> {
    let cycle = RefreshCycle::from_config(config, &args.sources)?;
    let refresh = Duration::from_secs(config.scheduler.refresh_secs);

    info!(
        symbol = %config.price_feed.symbol,
        refresh_secs = config.scheduler.refresh_secs,
        cycles = ?args.cycles,
        "Starting refresh loop"
    );

    let completed = run_schedule(&cycle, refresh, args.cycles, ctrl_c(), |report| {
        if let Err(e) = print_report(report, args.output) {
            warn!(error = %e, "Failed to print report");
        }
    })
    .await;

    info!(completed, "Refresh loop stopped");
    Ok(())
}
