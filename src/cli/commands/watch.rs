//! Dashboard command.

use anyhow::Result;
use signal_config::AppConfig;
use signal_monitor::{CycleOutcome, CycleReport, Dashboard, DashboardState};
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tracing::info;

use crate::cli::SourceArgs;
use crate::cycle::RefreshCycle;
use crate::scheduler::run_schedule;

const MAX_LOG_LINES: usize = 50;
const REDRAW_MS: u64 = 250;

pub async fn run(sources: SourceArgs, config: &AppConfig) -> Result<()> {
    let cycle = RefreshCycle::from_config(config, &sources)?;
    let refresh_secs = config.scheduler.refresh_secs;

    let (state_tx, state_rx) = watch::channel(DashboardState {
        refresh_secs,
        ..DashboardState::default()
    });
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let refresher = tokio::spawn(async move {
        let shutdown = async {
            let _ = stop_rx.await;
        };
        run_schedule(
            &cycle,
            Duration::from_secs(refresh_secs),
            None,
            shutdown,
            |report| {
                state_tx.send_modify(|state| {
                    state.messages.push(log_line(report));
                    if state.messages.len() > MAX_LOG_LINES {
                        state.messages.remove(0);
                    }
                    state.report = Some(report.clone());
                });
            },
        )
        .await
    });

    // The dashboard blocks on terminal input
    let ui = tokio::task::spawn_blocking(move || {
        Dashboard::new(REDRAW_MS).run(|| state_rx.borrow().clone())
    })
    .await?;

    let _ = stop_tx.send(());
    let completed = refresher.await?;
    info!(completed, "Dashboard closed");

    ui?;
    Ok(())
}

fn log_line(report: &CycleReport) -> String {
    let time = report.completed_at.format("%H:%M:%S");
    match &report.outcome {
        CycleOutcome::Evaluated(e) => format!(
            "{} {} | signal {} | sentiment {:.3}",
            time, e.decision, e.signal, e.sentiment
        ),
        CycleOutcome::Skipped { reason } => format!("{} skipped: {}", time, reason),
    }
}
