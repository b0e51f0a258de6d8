//! Single refresh cycle command.

use anyhow::{bail, Result};
use signal_config::AppConfig;
use signal_monitor::CycleOutcome;

use super::print_report;
use crate::cli::OnceArgs;
use crate::cycle::RefreshCycle;

pub async fn run(args: OnceArgs, config: &AppConfig) -> Result<()> {
    let cycle = RefreshCycle::from_config(config, &args.sources)?;
    let report = cycle.run_once().await;
    print_report(&report, args.output)?;

    if let CycleOutcome::Skipped { reason } = &report.outcome {
        bail!("Cycle skipped: {}", reason);
    }
    Ok(())
}
