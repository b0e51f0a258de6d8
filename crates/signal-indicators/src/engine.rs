//! Reduces a price series to the indicator values of its last bar.

use signal_core::error::IndicatorError;
use signal_core::traits::{Indicator, MultiOutputIndicator};
use signal_core::types::{IndicatorSnapshot, PriceSeries};
use tracing::debug;

use crate::momentum::{Macd, Rsi};

/// Computes RSI and MACD histogram for the most recent bar.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    rsi: Rsi,
    macd: Macd,
}

impl IndicatorEngine {
    /// Create an engine with custom periods.
    pub fn try_new(
        rsi_period: usize,
        macd_fast: usize,
        macd_slow: usize,
        macd_signal: usize,
    ) -> Result<Self, IndicatorError> {
        if rsi_period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI period must be greater than 0".into(),
            ));
        }
        if macd_fast == 0 || macd_slow == 0 || macd_signal == 0 {
            return Err(IndicatorError::InvalidParameter(
                "MACD spans must be greater than 0".into(),
            ));
        }
        if macd_fast >= macd_slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "MACD fast span ({}) must be less than slow span ({})",
                macd_fast, macd_slow
            )));
        }

        Ok(Self {
            rsi: Rsi::new(rsi_period),
            macd: Macd::with_periods(macd_fast, macd_slow, macd_signal),
        })
    }

    /// Indicator snapshot for the last bar of `series`.
    pub fn snapshot(&self, series: &PriceSeries) -> IndicatorSnapshot {
        self.snapshot_closes(&series.closes())
    }

    /// Indicator snapshot for the last of `closes` (oldest first).
    ///
    /// RSI is `None` with fewer than `period + 1` closes. The histogram is
    /// `None` only for an empty input.
    pub fn snapshot_closes(&self, closes: &[f64]) -> IndicatorSnapshot {
        let rsi = match self.rsi.validate_data(closes) {
            Ok(()) => self.rsi.latest(closes),
            Err(e) => {
                debug!(error = %e, "RSI unavailable");
                None
            }
        };
        let macd_histogram = self.macd.calculate(closes).last().map(|m| m.histogram);

        IndicatorSnapshot::new(rsi, macd_histogram)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_core::types::{PriceSeriesBuilder, RawBar};

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let records: Vec<RawBar> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| RawBar::new((1_714_557_600 + i as i64 * 900) as f64, c, c, c, c))
            .collect();
        PriceSeriesBuilder::default().build(&records)
    }

    #[test]
    fn test_snapshot_full_history() {
        let engine = IndicatorEngine::default();
        let closes: Vec<f64> = (0..40)
            .map(|i| 2300.0 + (i as f64 * 0.7).sin() * 4.0)
            .collect();
        let snapshot = engine.snapshot(&series_from_closes(&closes));

        assert!(snapshot.is_complete());
        let rsi = snapshot.rsi.unwrap();
        assert!((0.0..=100.0).contains(&rsi));
    }

    #[test]
    fn test_snapshot_short_history() {
        let engine = IndicatorEngine::default();
        let closes: Vec<f64> = (0..10).map(|i| 2300.0 + i as f64).collect();
        let snapshot = engine.snapshot(&series_from_closes(&closes));

        assert_eq!(snapshot.rsi, None);
        assert!(snapshot.macd_histogram.is_some());
    }

    #[test]
    fn test_snapshot_rising_series_saturates() {
        let engine = IndicatorEngine::default();
        let closes: Vec<f64> = (0..15).map(|i| 2300.0 + i as f64).collect();
        let snapshot = engine.snapshot_closes(&closes);
        assert_eq!(snapshot.rsi, Some(100.0));
    }

    #[test]
    fn test_snapshot_empty() {
        let snapshot = IndicatorEngine::default().snapshot_closes(&[]);
        assert_eq!(snapshot, IndicatorSnapshot::default());
    }

    #[test]
    fn test_try_new_validates() {
        assert!(IndicatorEngine::try_new(14, 12, 26, 9).is_ok());
        assert!(IndicatorEngine::try_new(0, 12, 26, 9).is_err());
        assert!(IndicatorEngine::try_new(14, 26, 12, 9).is_err());
        assert!(IndicatorEngine::try_new(14, 12, 26, 0).is_err());
    }
}
