//! Core traits for the signal fusion pipeline.

mod feed;
mod indicator;
mod polarity;

pub use feed::{ChannelFeed, NewsFeed, PriceFeed};
pub use indicator::{Indicator, MultiOutputIndicator};
pub use polarity::PolarityScorer;
