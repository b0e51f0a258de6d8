//! Technical indicators for the signal fusion pipeline.
//!
//! This crate provides:
//! - Moving averages (rolling SMA, first-value-seeded EMA)
//! - Momentum indicators (RSI over simple rolling means, MACD)
//! - [`IndicatorEngine`], which reduces a price series to an
//!   [`IndicatorSnapshot`](signal_core::IndicatorSnapshot) for its last bar

pub mod engine;
pub mod momentum;
pub mod moving_average;

pub use engine::IndicatorEngine;
pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
