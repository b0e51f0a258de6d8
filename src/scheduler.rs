//! Periodic refresh loop.

use futures::StreamExt;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;
use tracing::{debug, error, info};

use signal_monitor::CycleReport;

use crate::cycle::RefreshCycle;

/// Run cycles every `refresh` until `max_cycles` or `shutdown` resolves.
///
/// The first cycle starts immediately. Cycles never overlap: a tick that
/// falls due while a cycle is still running is skipped. Shutdown is only
/// observed between cycles, so an in-flight cycle always reports.
/// Returns the number of cycles run.
pub async fn run_schedule<S, F>(
    cycle: &RefreshCycle,
    refresh: Duration,
    max_cycles: Option<usize>,
    shutdown: S,
    mut on_report: F,
) -> usize
where
    S: Future<Output = ()>,
    F: FnMut(&CycleReport),
{
    let mut interval = tokio::time::interval(refresh);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ticks = IntervalStream::new(interval).take(max_cycles.unwrap_or(usize::MAX));

    tokio::pin!(shutdown);
    let mut completed = 0;

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!(completed, "Shutdown requested");
                break;
            }
            tick = ticks.next() => {
                if tick.is_none() {
                    debug!(completed, "Cycle limit reached");
                    break;
                }
                let report = cycle.run_once().await;
                completed += 1;
                on_report(&report);
            }
        }
    }

    completed
}

/// Resolves on Ctrl-C.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
