//! Core data types for the signal fusion pipeline.

mod bar;
mod interval;
mod news;
mod signal;

pub use bar::{parse_timestamp, PriceBar, PriceSeries, PriceSeriesBuilder, RawBar, RawValue};
pub use interval::Interval;
pub use news::{ChannelMessage, NewsItem};
pub use signal::{Decision, DiscreteSignal, Evaluation, IndicatorSnapshot, SentimentScore};
