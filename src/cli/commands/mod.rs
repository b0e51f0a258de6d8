//! CLI command implementations.

pub mod once;
pub mod run;
pub mod validate;
pub mod watch;

use anyhow::Result;
use signal_monitor::{render_text, CycleReport};

use crate::cli::OutputFormat;

/// Print a report to stdout in the requested format.
fn print_report(report: &CycleReport, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Text => println!("{}", render_text(report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
