//! TUI Dashboard using ratatui.

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};
use signal_core::types::{Decision, DiscreteSignal};
use std::io;
use std::time::Duration;

use crate::report::{fmt_opt, CycleOutcome, CycleReport};

/// Dashboard state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    /// Latest finished cycle, if any
    pub report: Option<CycleReport>,
    pub refresh_secs: u64,
    /// Cycle log lines, oldest first
    pub messages: Vec<String>,
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh_ms: u64,
}

impl Dashboard {
    /// Create a new dashboard redrawing every `refresh_ms`.
    pub fn new(refresh_ms: u64) -> Self {
        Self { refresh_ms }
    }

    /// Run the dashboard until `q` or Esc.
    pub fn run<F>(&self, mut get_state: F) -> io::Result<()>
    where
        F: FnMut() -> DashboardState,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, &mut get_state);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<B, F>(&self, terminal: &mut Terminal<B>, get_state: &mut F) -> io::Result<()>
    where
        B: Backend,
        F: FnMut() -> DashboardState,
    {
        loop {
            let state = get_state();
            terminal.draw(|f| self.ui(f, &state))?;

            if event::poll(Duration::from_millis(self.refresh_ms))? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn ui(&self, frame: &mut Frame, state: &DashboardState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(8), // Signals
                Constraint::Min(10),   // Chart
                Constraint::Length(8), // Log
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], state);
        self.render_signals(frame, chunks[1], state);
        self.render_chart(frame, chunks[2], state);
        self.render_messages(frame, chunks[3], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let updated = state
            .report
            .as_ref()
            .map(|r| r.completed_at.format("%H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "waiting for first cycle".to_string());

        let header = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                "XAU/USD Signal Monitor",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(updated, Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | every {}s | Press 'q' to quit", state.refresh_secs)),
        ])])
        .block(Block::default().borders(Borders::ALL).title("System"));
        frame.render_widget(header, area);
    }

    fn render_signals(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let lines = match state.report.as_ref().map(|r| (r, &r.outcome)) {
            Some((report, CycleOutcome::Evaluated(e))) => {
                let decision_color = match e.decision {
                    Decision::Trade => Color::Green,
                    Decision::Risk => Color::Yellow,
                    Decision::DontTrade => Color::Red,
                };
                let signal_color = match e.signal {
                    DiscreteSignal::Buy => Color::Green,
                    DiscreteSignal::Sell => Color::Red,
                    DiscreteSignal::Uncertain => Color::Yellow,
                };

                vec![
                    Line::from(vec![
                        Span::raw("Last close: "),
                        Span::styled(
                            fmt_opt(report.last_close, 2),
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("  |  RSI: "),
                        Span::raw(fmt_opt(e.indicators.rsi, 2)),
                        Span::raw("  |  MACD hist: "),
                        Span::raw(fmt_opt(e.indicators.macd_histogram, 4)),
                    ]),
                    Line::from(vec![
                        Span::raw("News sentiment: "),
                        Span::raw(format!("{:.3}", e.sentiment)),
                        Span::raw("  |  Channel signal: "),
                        Span::styled(e.signal.to_string(), Style::default().fg(signal_color)),
                    ]),
                    Line::from(""),
                    Line::from(vec![
                        Span::raw("Decision: "),
                        Span::styled(
                            e.decision.to_string(),
                            Style::default()
                                .fg(decision_color)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ]),
                    Line::from(Span::styled(
                        e.decision.advice(),
                        Style::default().fg(decision_color),
                    )),
                ]
            }
            Some((_, CycleOutcome::Skipped { reason })) => vec![Line::from(Span::styled(
                format!("Cycle skipped: {}", reason),
                Style::default().fg(Color::Red),
            ))],
            None => vec![Line::from("No data yet")],
        };

        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Signals"));
        frame.render_widget(paragraph, area);
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let closes: &[f64] = state
            .report
            .as_ref()
            .map(|r| r.closes.as_slice())
            .unwrap_or_default();
        let points: Vec<(f64, f64)> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| (i as f64, c))
            .collect();

        let (min, max) = closes
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
                (lo.min(c), hi.max(c))
            });
        let (min, max) = if min.is_finite() {
            let pad = ((max - min) * 0.05).max(0.5);
            (min - pad, max + pad)
        } else {
            (0.0, 1.0)
        };

        let dataset = Dataset::default()
            .name("close")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Yellow))
            .data(&points);

        let chart = Chart::new(vec![dataset])
            .block(Block::default().borders(Borders::ALL).title("Close"))
            .x_axis(Axis::default().bounds([0.0, points.len().max(1) as f64]))
            .y_axis(
                Axis::default()
                    .bounds([min, max])
                    .labels(vec![
                        Span::raw(format!("{:.2}", min)),
                        Span::raw(format!("{:.2}", max)),
                    ]),
            );
        frame.render_widget(chart, area);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let messages: Vec<Line> = state
            .messages
            .iter()
            .rev()
            .take(6)
            .map(|m| Line::from(m.as_str()))
            .collect();

        let paragraph =
            Paragraph::new(messages).block(Block::default().borders(Borders::ALL).title("Log"));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use signal_core::types::{Evaluation, IndicatorSnapshot, PriceSeriesBuilder, RawBar};
    use uuid::Uuid;

    fn screen(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let dashboard = Dashboard::new(250);
        terminal.draw(|f| dashboard.ui(f, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_state() {
        let text = screen(&DashboardState::default());
        assert!(text.contains("XAU/USD Signal Monitor"));
        assert!(text.contains("No data yet"));
    }

    #[test]
    fn test_evaluated_state() {
        let series = PriceSeriesBuilder::default().build(&[
            RawBar::new("2024-05-01 10:15:00", 2329.9, 2331.0, 2328.8, 2330.1),
            RawBar::new("2024-05-01 10:30:00", 2330.1, 2332.0, 2329.5, 2331.2),
        ]);
        let evaluation = Evaluation {
            indicators: IndicatorSnapshot::new(None, Some(0.5)),
            sentiment: 0.05,
            signal: DiscreteSignal::Uncertain,
            decision: Decision::Risk,
        };
        let state = DashboardState {
            report: Some(CycleReport::evaluated(Uuid::new_v4(), &series, evaluation)),
            refresh_secs: 60,
            messages: vec!["cycle 1: Risk".to_string()],
        };

        let text = screen(&state);
        assert!(text.contains("2331.20"));
        assert!(text.contains("RSI: n/a"));
        assert!(text.contains("Risky trade. Mixed signals."));
        assert!(text.contains("cycle 1: Risk"));
    }
}
