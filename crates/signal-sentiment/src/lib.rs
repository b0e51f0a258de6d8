//! News sentiment scoring and aggregation.
//!
//! [`LexiconScorer`] is the default general-purpose polarity scorer;
//! [`SentimentAggregator`] reduces a handful of news items to one score.

mod aggregator;
mod lexicon;
mod scorer;

pub use aggregator::{SentimentAggregator, DEFAULT_MAX_ITEMS};
pub use lexicon::Lexicon;
pub use scorer::LexiconScorer;
