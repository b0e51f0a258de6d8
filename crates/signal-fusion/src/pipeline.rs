//! The single entry point from raw inputs to a decision.

use signal_core::error::{FusionError, FusionResult};
use signal_core::traits::PolarityScorer;
use signal_core::types::{
    ChannelMessage, DiscreteSignal, Evaluation, NewsItem, PriceSeries, PriceSeriesBuilder, RawBar,
};
use signal_indicators::IndicatorEngine;
use signal_sentiment::{LexiconScorer, SentimentAggregator};
use tracing::debug;

use crate::channel::ChannelSignalParser;
use crate::classifier::DecisionClassifier;

/// Builder, engine, aggregator, parser and classifier wired together.
///
/// Holds configuration only; every call recomputes from its inputs.
#[derive(Debug, Clone)]
pub struct SignalPipeline<S = LexiconScorer> {
    builder: PriceSeriesBuilder,
    engine: IndicatorEngine,
    sentiment: SentimentAggregator<S>,
    parser: ChannelSignalParser,
    classifier: DecisionClassifier,
}

impl Default for SignalPipeline<LexiconScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalPipeline<LexiconScorer> {
    /// Pipeline with default periods, scorer and instrument.
    pub fn new() -> Self {
        Self::with_parts(
            PriceSeriesBuilder::default(),
            IndicatorEngine::default(),
            SentimentAggregator::new(),
            ChannelSignalParser::default(),
        )
    }
}

impl<S: PolarityScorer> SignalPipeline<S> {
    /// Pipeline from configured components.
    pub fn with_parts(
        builder: PriceSeriesBuilder,
        engine: IndicatorEngine,
        sentiment: SentimentAggregator<S>,
        parser: ChannelSignalParser,
    ) -> Self {
        Self {
            builder,
            engine,
            sentiment,
            parser,
            classifier: DecisionClassifier::new(),
        }
    }

    /// Normalize raw bars; empty when the batch is unusable.
    pub fn build_series(&self, bars: &[RawBar]) -> PriceSeries {
        self.builder.build(bars)
    }

    pub fn parser(&self) -> &ChannelSignalParser {
        &self.parser
    }

    /// Evaluate raw inputs.
    ///
    /// `messages` is `None` when the channel feed could not be reached.
    pub fn evaluate(
        &self,
        bars: &[RawBar],
        news: &[NewsItem],
        messages: Option<&[ChannelMessage]>,
    ) -> FusionResult<Evaluation> {
        self.evaluate_series(&self.build_series(bars), news, messages)
    }

    /// Evaluate an already built series.
    ///
    /// Fails only with [`FusionError::EmptySeries`]; every other missing
    /// input degrades to a conservative default.
    pub fn evaluate_series(
        &self,
        series: &PriceSeries,
        news: &[NewsItem],
        messages: Option<&[ChannelMessage]>,
    ) -> FusionResult<Evaluation> {
        if series.is_empty() {
            return Err(FusionError::EmptySeries);
        }

        let indicators = self.engine.snapshot(series);
        let sentiment = self.sentiment.aggregate(news);
        let signal = match messages {
            Some(messages) => self.parser.parse(messages),
            None => {
                debug!("Channel unavailable, signal defaults to Uncertain");
                DiscreteSignal::Uncertain
            }
        };
        let decision = self.classifier.classify(&indicators, sentiment, signal);

        debug!(
            bars = series.len(),
            rsi = ?indicators.rsi,
            macd_histogram = ?indicators.macd_histogram,
            sentiment,
            %signal,
            %decision,
            "Evaluated signals"
        );

        Ok(Evaluation {
            indicators,
            sentiment,
            signal,
            decision,
        })
    }
}

/// Evaluate with the default pipeline.
pub fn evaluate(
    bars: &[RawBar],
    news: &[NewsItem],
    messages: Option<&[ChannelMessage]>,
) -> FusionResult<Evaluation> {
    SignalPipeline::new().evaluate(bars, news, messages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_core::types::Decision;

    fn bars_from_closes(closes: &[f64]) -> Vec<RawBar> {
        // Newest first, as the price feed serves them
        closes
            .iter()
            .enumerate()
            .rev()
            .map(|(i, &c)| {
                let ts = format!("2024-05-01 {:02}:{:02}:00", 8 + i / 4, (i % 4) * 15);
                RawBar::new(
                    ts,
                    c.to_string(),
                    (c + 1.0).to_string(),
                    (c - 1.0).to_string(),
                    c.to_string(),
                )
            })
            .collect()
    }

    /// A steep slide that decelerates: oversold RSI, rising histogram.
    fn oversold_slowdown() -> Vec<RawBar> {
        let mut closes: Vec<f64> = (0..30).map(|i| 2400.0 - i as f64 * 5.0).collect();
        closes.extend((1..=8).map(|k| 2255.0 - k as f64 * 0.5));
        bars_from_closes(&closes)
    }

    fn bullish_news() -> Vec<NewsItem> {
        vec![
            NewsItem::new("Gold rallies", "Bullion surges on strong haven demand"),
            NewsItem::new("Gold outlook bullish", "Analysts see excellent gains ahead"),
        ]
    }

    #[test]
    fn test_empty_bars_is_fatal() {
        let result = evaluate(&[], &bullish_news(), None);
        assert!(matches!(result, Err(FusionError::EmptySeries)));
    }

    #[test]
    fn test_trade_when_everything_aligns() {
        let messages = vec![ChannelMessage::new("XAUUSD BUY 2251 now")];
        let evaluation =
            evaluate(&oversold_slowdown(), &bullish_news(), Some(messages.as_slice())).unwrap();

        let rsi = evaluation.indicators.rsi.unwrap();
        assert!(rsi < 30.0, "rsi = {}", rsi);
        assert!(evaluation.indicators.macd_histogram.unwrap() > 0.0);
        assert!(evaluation.sentiment > 0.2);
        assert_eq!(evaluation.signal, DiscreteSignal::Buy);
        assert_eq!(evaluation.decision, Decision::Trade);
    }

    #[test]
    fn test_channel_unavailable_forces_risk() {
        let evaluation = evaluate(&oversold_slowdown(), &bullish_news(), None).unwrap();
        assert_eq!(evaluation.signal, DiscreteSignal::Uncertain);
        assert_eq!(evaluation.decision, Decision::Risk);
    }

    #[test]
    fn test_no_news_is_neutral_risk() {
        let messages = vec![ChannelMessage::new("XAUUSD SELL")];
        let evaluation = evaluate(&oversold_slowdown(), &[], Some(messages.as_slice())).unwrap();
        assert_eq!(evaluation.sentiment, 0.0);
        assert_eq!(evaluation.decision, Decision::Risk);
    }

    #[test]
    fn test_short_history_cannot_trade() {
        let messages = vec![ChannelMessage::new("XAUUSD BUY")];
        let bars = bars_from_closes(&[2330.0, 2320.0, 2325.0]);
        let evaluation = evaluate(&bars, &bullish_news(), Some(messages.as_slice())).unwrap();
        assert_eq!(evaluation.indicators.rsi, None);
        assert_eq!(evaluation.decision, Decision::DontTrade);
    }

    #[test]
    fn test_series_is_sorted_before_indicators() {
        let pipeline = SignalPipeline::new();
        let series = pipeline.build_series(&oversold_slowdown());
        assert_eq!(series.last().unwrap().close, 2251.0);
        assert_eq!(series.bars()[0].close, 2400.0);
    }
}
