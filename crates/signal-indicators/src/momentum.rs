//! Momentum indicators.

use serde::{Deserialize, Serialize};
use signal_core::traits::{Indicator, MultiOutputIndicator};

use crate::moving_average::{Ema, Sma};

/// Relative Strength Index (RSI).
///
/// Average gain and average loss are simple rolling means over `period`
/// price changes, not Wilder's smoothing. A window without losses yields
/// exactly 100.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Number of price changes averaged per window.
    pub fn lookback(&self) -> usize {
        self.period
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    /// Output `i` belongs to input index `i + period`.
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let (gains, losses): (Vec<f64>, Vec<f64>) = data
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        let sma = Sma::new(self.period);
        let avg_gains = sma.calculate(&gains);
        let avg_losses = sma.calculate(&losses);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| {
                if loss == 0.0 {
                    100.0
                } else {
                    100.0 - (100.0 / (1.0 + gain / loss))
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// All three EMAs are seeded with their first input, so a value exists for
/// every bar. Early values are noisy until roughly `slow` bars have passed.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let fast_ema = self.fast.calculate(data);
        let slow_ema = self.slow.calculate(data);

        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();
        let signal_line = self.signal.calculate(&macd_line);

        macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, &signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    /// Bars before the slow EMA has settled.
    fn period(&self) -> usize {
        self.slow.span()
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_bounds() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), data.len() - 14);

        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains_saturates() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..15).map(|i| 2300.0 + i as f64).collect();
        let result = rsi.calculate(&data);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0], 100.0);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        assert!(result[0].abs() < 1e-10);
    }

    #[test]
    fn test_rsi_uses_simple_means() {
        // Changes: +1, -0.5, +1, -0.5
        let rsi = Rsi::new(3);
        let data = vec![10.0, 11.0, 10.5, 11.5, 11.0];
        let result = rsi.calculate(&data);

        assert_eq!(result.len(), 2);
        // gains 2/3, losses 1/6 -> RS 4
        assert!((result[0] - 80.0).abs() < 1e-9);
        // gains 1/3, losses 1/3 -> RS 1 (Wilder would give ~61.5)
        assert!((result[1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_needs_period_plus_one_points() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
        assert!(rsi.calculate(&data).is_empty());
        assert!(rsi.validate_data(&data).is_err());
        assert_eq!(rsi.latest(&data), None);
    }

    #[test]
    fn test_macd_constant_series_is_flat() {
        let macd = Macd::new();
        let data = vec![2350.0; 60];
        let result = macd.calculate(&data);

        assert_eq!(result.len(), 60);
        let last = result.last().unwrap();
        assert!(last.macd.abs() < 1e-9);
        assert!(last.histogram.abs() < 1e-9);
    }

    #[test]
    fn test_macd_uptrend() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert!(result.last().unwrap().macd > 0.0);
    }

    #[test]
    fn test_macd_recurrence() {
        // fast α=1 tracks price, slow α=0.5, signal α=0.5
        let macd = Macd::with_periods(1, 3, 3);
        let result = macd.calculate(&[1.0, 2.0]);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].histogram, 0.0);
        assert!((result[1].macd - 0.5).abs() < 1e-12);
        assert!((result[1].signal - 0.25).abs() < 1e-12);
        assert!((result[1].histogram - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_macd_single_bar() {
        let result = Macd::new().calculate(&[2350.0]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].histogram, 0.0);
    }
}
