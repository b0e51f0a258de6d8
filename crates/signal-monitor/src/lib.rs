//! Cycle reports, logging and TUI dashboard.

mod dashboard;
mod logging;
mod report;

pub use dashboard::{Dashboard, DashboardState};
pub use logging::setup_logging;
pub use report::{render_text, CycleOutcome, CycleReport, CHART_POINTS};
