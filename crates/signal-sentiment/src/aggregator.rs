//! Reduces recent news to a single sentiment score.

use signal_core::traits::PolarityScorer;
use signal_core::types::{NewsItem, SentimentScore};
use tracing::debug;

use crate::scorer::LexiconScorer;

/// Number of leading (most recent) news items considered per cycle.
pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Mean polarity over the most recent news items.
#[derive(Debug, Clone)]
pub struct SentimentAggregator<S = LexiconScorer> {
    scorer: S,
    max_items: usize,
}

impl Default for SentimentAggregator<LexiconScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAggregator<LexiconScorer> {
    /// Create an aggregator backed by the built-in lexicon scorer.
    pub fn new() -> Self {
        Self::with_scorer(LexiconScorer::new())
    }
}

impl<S: PolarityScorer> SentimentAggregator<S> {
    /// Create an aggregator over a custom scorer.
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            scorer,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }

    /// Set how many leading items are considered.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Arithmetic mean of `title + ". " + description` polarities over the
    /// first `max_items` items. No items scores 0 (neutral).
    pub fn aggregate(&self, items: &[NewsItem]) -> SentimentScore {
        let considered = &items[..items.len().min(self.max_items)];
        if considered.is_empty() {
            debug!("No news items, sentiment defaults to neutral");
            return 0.0;
        }

        let total: f64 = considered
            .iter()
            .map(|item| self.scorer.polarity(&item.content()).clamp(-1.0, 1.0))
            .sum();
        total / considered.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scores by keyword so results are easy to predict.
    struct KeywordScorer;

    impl PolarityScorer for KeywordScorer {
        fn polarity(&self, text: &str) -> f64 {
            if text.contains("up") {
                1.0
            } else if text.contains("down") {
                -0.5
            } else {
                0.0
            }
        }
    }

    #[test]
    fn test_empty_is_neutral() {
        assert_eq!(SentimentAggregator::new().aggregate(&[]), 0.0);
    }

    #[test]
    fn test_mean_over_items() {
        let aggregator = SentimentAggregator::with_scorer(KeywordScorer);
        let items = vec![
            NewsItem::new("Gold up", ""),
            NewsItem::new("Gold down", ""),
            NewsItem::new("Gold flat", ""),
        ];
        assert!((aggregator.aggregate(&items) - 0.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_only_first_items_count() {
        let aggregator = SentimentAggregator::with_scorer(KeywordScorer);
        let mut items = vec![NewsItem::new("Gold up", ""); 5];
        items.push(NewsItem::new("Gold down", ""));
        assert_eq!(aggregator.aggregate(&items), 1.0);

        let aggregator = aggregator.with_max_items(1);
        assert_eq!(aggregator.aggregate(&items[4..]), 1.0);
    }

    #[test]
    fn test_description_is_scored() {
        let aggregator = SentimentAggregator::with_scorer(KeywordScorer);
        let items = vec![NewsItem::new("Gold", "prices down on strong dollar")];
        assert_eq!(aggregator.aggregate(&items), -0.5);
    }

    #[test]
    fn test_lexicon_result_bounded() {
        let aggregator = SentimentAggregator::new();
        let items = vec![
            NewsItem::new(
                "Gold soars to record high",
                "Extremely bullish rally as safe haven demand surges",
            ),
            NewsItem::new("Gold crash", "Terrible, awful selloff deepens crisis"),
            NewsItem::new("Fed minutes due", "Traders await guidance"),
        ];
        let score = aggregator.aggregate(&items);
        assert!((-1.0..=1.0).contains(&score));
    }
}
