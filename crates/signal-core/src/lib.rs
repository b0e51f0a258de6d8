//! Core types and traits for the signal fusion pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PriceBar, PriceSeries) and the series builder
//! - News and channel message records
//! - Derived signals (IndicatorSnapshot, DiscreteSignal, Decision)
//! - Core traits for indicators, polarity scoring and data feeds

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, FusionError, FusionResult, IndicatorError, SeriesError};
pub use traits::*;
pub use types::*;
