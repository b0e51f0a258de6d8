//! Signal fusion.
//!
//! This crate turns the three derived inputs into one recommendation:
//! - [`ChannelSignalParser`]: first-match scan of channel messages
//! - [`DecisionClassifier`]: fixed-priority Trade / Risk / Don't Trade rule
//! - [`SignalPipeline`] and [`evaluate`]: the single entry point over raw inputs

mod channel;
mod classifier;
mod pipeline;

pub use channel::{ChannelMatch, ChannelSignalParser, DEFAULT_INSTRUMENT, DEFAULT_MAX_MESSAGES};
pub use classifier::{
    DecisionClassifier, MACD_HIST_FLOOR, RSI_OVERSOLD, SENTIMENT_BULLISH, SENTIMENT_NEUTRAL_BAND,
};
pub use pipeline::{evaluate, SignalPipeline};
