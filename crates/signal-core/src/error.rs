//! Error types for the signal fusion pipeline.

use thiserror::Error;

/// Top-level pipeline error.
#[derive(Error, Debug)]
pub enum FusionError {
    /// No usable price bars: nothing can be decided this cycle.
    #[error("Price series is empty")]
    EmptySeries,
}

/// Reasons a batch of raw bars cannot be turned into a price series.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("No bars supplied")]
    Empty,

    #[error("Record {index} is missing field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Record {index} has a non-numeric '{field}': {value}")]
    InvalidNumber {
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("Record {index} has an invalid '{field}' price: {value}")]
    InvalidPrice {
        index: usize,
        field: &'static str,
        value: f64,
    },

    #[error("Record {index} has an unparseable timestamp: {value}")]
    InvalidTimestamp { index: usize, value: String },
}

/// Data feed errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("No data available")]
    NoDataAvailable,

    #[error("Feed unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Indicator calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for pipeline operations.
pub type FusionResult<T> = Result<T, FusionError>;
