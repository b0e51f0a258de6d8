//! Fixed-priority decision rule.

use signal_core::types::{Decision, DiscreteSignal, IndicatorSnapshot, SentimentScore};

/// RSI must be strictly below this for a Trade.
pub const RSI_OVERSOLD: f64 = 30.0;

/// MACD histogram must be strictly above this for a Trade.
pub const MACD_HIST_FLOOR: f64 = 0.0;

/// Sentiment must be strictly above this for a Trade.
pub const SENTIMENT_BULLISH: f64 = 0.2;

/// Sentiment with magnitude strictly below this counts as neutral.
pub const SENTIMENT_NEUTRAL_BAND: f64 = 0.1;

/// Stateless classifier over the three fused signals.
///
/// Rules, first match wins:
/// 1. RSI < 30, histogram > 0, sentiment > 0.2 and a Buy call → Trade
/// 2. an Uncertain call or |sentiment| < 0.1 → Risk
/// 3. otherwise → Don't Trade
///
/// An unavailable indicator fails rule 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionClassifier;

impl DecisionClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify from a snapshot.
    pub fn classify(
        &self,
        indicators: &IndicatorSnapshot,
        sentiment: SentimentScore,
        signal: DiscreteSignal,
    ) -> Decision {
        Self::decide(indicators.rsi, indicators.macd_histogram, sentiment, signal)
    }

    /// Classify from raw values.
    pub fn decide(
        rsi: Option<f64>,
        macd_histogram: Option<f64>,
        sentiment: SentimentScore,
        signal: DiscreteSignal,
    ) -> Decision {
        // NaN compares false, so it fails like a missing value
        let oversold = rsi.is_some_and(|r| r < RSI_OVERSOLD);
        let rising = macd_histogram.is_some_and(|h| h > MACD_HIST_FLOOR);

        if oversold && rising && sentiment > SENTIMENT_BULLISH && signal == DiscreteSignal::Buy {
            Decision::Trade
        } else if signal == DiscreteSignal::Uncertain || sentiment.abs() < SENTIMENT_NEUTRAL_BAND {
            Decision::Risk
        } else {
            Decision::DontTrade
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_core::types::DiscreteSignal::*;

    #[test]
    fn test_scenario_trade() {
        assert_eq!(
            DecisionClassifier::decide(Some(25.0), Some(0.5), 0.3, Buy),
            Decision::Trade
        );
    }

    #[test]
    fn test_scenario_uncertain_overrides() {
        assert_eq!(
            DecisionClassifier::decide(Some(25.0), Some(0.5), 0.3, Uncertain),
            Decision::Risk
        );
    }

    #[test]
    fn test_scenario_neutral_sentiment() {
        assert_eq!(
            DecisionClassifier::decide(Some(50.0), Some(-0.1), 0.05, Sell),
            Decision::Risk
        );
    }

    #[test]
    fn test_scenario_dont_trade() {
        assert_eq!(
            DecisionClassifier::decide(Some(50.0), Some(-0.1), 0.4, Sell),
            Decision::DontTrade
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(
            DecisionClassifier::decide(Some(30.0), Some(0.5), 0.3, Buy),
            Decision::DontTrade
        );
        assert_eq!(
            DecisionClassifier::decide(Some(25.0), Some(0.0), 0.3, Buy),
            Decision::DontTrade
        );
        assert_eq!(
            DecisionClassifier::decide(Some(25.0), Some(0.5), 0.2, Buy),
            Decision::DontTrade
        );
        assert_eq!(
            DecisionClassifier::decide(Some(50.0), None, 0.1, Sell),
            Decision::DontTrade
        );
        assert_eq!(
            DecisionClassifier::decide(Some(50.0), None, -0.05, Buy),
            Decision::Risk
        );
    }

    #[test]
    fn test_unavailable_indicators_never_trade() {
        assert_eq!(
            DecisionClassifier::decide(None, Some(0.5), 0.3, Buy),
            Decision::DontTrade
        );
        assert_eq!(
            DecisionClassifier::decide(Some(25.0), None, 0.3, Buy),
            Decision::DontTrade
        );
        assert_eq!(
            DecisionClassifier::decide(Some(f64::NAN), Some(0.5), 0.3, Buy),
            Decision::DontTrade
        );
        assert_eq!(
            DecisionClassifier::decide(None, None, 0.0, Buy),
            Decision::Risk
        );
    }

    #[test]
    fn test_deterministic() {
        let classifier = DecisionClassifier::new();
        let snapshot = IndicatorSnapshot::new(Some(25.0), Some(0.5));
        let first = classifier.classify(&snapshot, 0.3, Buy);
        for _ in 0..100 {
            assert_eq!(classifier.classify(&snapshot, 0.3, Buy), first);
        }
        let _ = classifier.classify(&snapshot, 0.0, Uncertain);
        assert_eq!(classifier.classify(&snapshot, 0.3, Buy), first);
    }
}
