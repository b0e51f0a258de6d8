//! Per-cycle report and its text rendering.

use chrono::{DateTime, Utc};
use serde::Serialize;
use signal_core::types::{Evaluation, PriceSeries};
use std::fmt::Write;
use uuid::Uuid;

/// Closes kept for the dashboard chart (one day of 15-minute bars).
pub const CHART_POINTS: usize = 96;

/// What a refresh cycle produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CycleOutcome {
    Evaluated(Evaluation),
    Skipped { reason: String },
}

/// One refresh cycle, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub symbol: String,
    pub last_close: Option<f64>,
    /// Most recent closes, oldest first
    pub closes: Vec<f64>,
    pub outcome: CycleOutcome,
}

impl CycleReport {
    pub fn evaluated(cycle_id: Uuid, series: &PriceSeries, evaluation: Evaluation) -> Self {
        let closes = series.closes();
        let start = closes.len().saturating_sub(CHART_POINTS);
        Self {
            cycle_id,
            completed_at: Utc::now(),
            symbol: series.symbol.clone(),
            last_close: series.last().map(|b| b.close),
            closes: closes[start..].to_vec(),
            outcome: CycleOutcome::Evaluated(evaluation),
        }
    }

    pub fn skipped(cycle_id: Uuid, symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            cycle_id,
            completed_at: Utc::now(),
            symbol: symbol.into(),
            last_close: None,
            closes: Vec::new(),
            outcome: CycleOutcome::Skipped {
                reason: reason.into(),
            },
        }
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        match &self.outcome {
            CycleOutcome::Evaluated(evaluation) => Some(evaluation),
            CycleOutcome::Skipped { .. } => None,
        }
    }
}

/// Display value for an indicator that may be unavailable.
pub(crate) fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => "n/a".to_string(),
    }
}

/// Render a report as plain text.
pub fn render_text(report: &CycleReport) -> String {
    let mut out = String::new();
    let title = "XAU/USD Signal Monitor";
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.len()));
    let _ = writeln!(
        out,
        "Cycle:           {} ({})",
        report.cycle_id,
        report.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(
        out,
        "Last close:      {}",
        fmt_opt(report.last_close, 2)
    );

    match &report.outcome {
        CycleOutcome::Evaluated(e) => {
            let _ = writeln!(out, "RSI:             {}", fmt_opt(e.indicators.rsi, 2));
            let _ = writeln!(
                out,
                "MACD histogram:  {}",
                fmt_opt(e.indicators.macd_histogram, 4)
            );
            let _ = writeln!(out, "News sentiment:  {:.3}", e.sentiment);
            let _ = writeln!(out, "Channel signal:  {}", e.signal);
            let _ = writeln!(out);
            let _ = writeln!(out, "Decision: {}", e.decision);
            let _ = writeln!(out, "{}", e.decision.advice());
        }
        CycleOutcome::Skipped { reason } => {
            let _ = writeln!(out);
            let _ = writeln!(out, "Cycle skipped: {}", reason);
        }
    }

    out
}
