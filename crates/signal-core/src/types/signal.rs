//! Derived signals and the fused decision.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate news polarity in [-1, 1]; 0 is neutral or no data.
pub type SentimentScore = f64;

/// Indicator values for the most recent bar of a series.
///
/// `None` marks an indicator that could not be computed (too little history).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub macd_histogram: Option<f64>,
}

impl IndicatorSnapshot {
    pub fn new(rsi: Option<f64>, macd_histogram: Option<f64>) -> Self {
        Self {
            rsi,
            macd_histogram,
        }
    }

    /// Both indicators are available.
    pub fn is_complete(&self) -> bool {
        self.rsi.is_some() && self.macd_histogram.is_some()
    }
}

/// Instruction extracted from the signal channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscreteSignal {
    Buy,
    Sell,
    #[default]
    Uncertain,
}

impl fmt::Display for DiscreteSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiscreteSignal::Buy => "Buy",
            DiscreteSignal::Sell => "Sell",
            DiscreteSignal::Uncertain => "Uncertain",
        };
        f.write_str(s)
    }
}

/// Final trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Trade,
    Risk,
    DontTrade,
}

impl Decision {
    /// One-line advice shown next to the decision.
    pub fn advice(&self) -> &'static str {
        match self {
            Decision::Trade => "Conditions favorable for trading.",
            Decision::Risk => "Risky trade. Mixed signals.",
            Decision::DontTrade => "Do not trade. Poor conditions.",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Decision::Trade => "Trade",
            Decision::Risk => "Risk",
            Decision::DontTrade => "Don't Trade",
        };
        f.write_str(s)
    }
}

/// Everything one evaluation derives from its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub indicators: IndicatorSnapshot,
    pub sentiment: SentimentScore,
    pub signal: DiscreteSignal,
    pub decision: Decision,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DiscreteSignal::Buy.to_string(), "Buy");
        assert_eq!(Decision::DontTrade.to_string(), "Don't Trade");
        assert_eq!(Decision::Risk.advice(), "Risky trade. Mixed signals.");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&Decision::DontTrade).unwrap(),
            "\"dont_trade\""
        );
        assert_eq!(
            serde_json::to_string(&DiscreteSignal::Uncertain).unwrap(),
            "\"uncertain\""
        );
    }

    #[test]
    fn test_snapshot_completeness() {
        assert!(IndicatorSnapshot::new(Some(40.0), Some(0.1)).is_complete());
        assert!(!IndicatorSnapshot::new(None, Some(0.1)).is_complete());
    }
}
