//! CSV price feed for offline cycles.

use async_trait::async_trait;
use csv::ReaderBuilder;
use serde::Deserialize;
use signal_core::error::DataError;
use signal_core::traits::PriceFeed;
use signal_core::types::{RawBar, RawValue};
use std::path::{Path, PathBuf};

/// CSV record format. Values stay raw; the series builder validates them.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "date",
        alias = "Datetime",
        alias = "timestamp",
        alias = "Timestamp",
        default
    )]
    datetime: Option<String>,
    #[serde(alias = "Open", default)]
    open: Option<String>,
    #[serde(alias = "High", default)]
    high: Option<String>,
    #[serde(alias = "Low", default)]
    low: Option<String>,
    #[serde(alias = "Close", alias = "Adj Close", default)]
    close: Option<String>,
}

impl From<CsvRecord> for RawBar {
    fn from(record: CsvRecord) -> Self {
        // Empty cells count as missing
        let cell = |v: Option<String>| v.filter(|s| !s.trim().is_empty()).map(RawValue::Text);
        RawBar {
            datetime: cell(record.datetime),
            open: cell(record.open),
            high: cell(record.high),
            low: cell(record.low),
            close: cell(record.close),
        }
    }
}

/// Parse CSV text with a header row into raw bars, in file order.
pub(crate) fn parse_csv(text: &str) -> Result<Vec<RawBar>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    reader
        .deserialize::<CsvRecord>()
        .map(|result| {
            result
                .map(RawBar::from)
                .map_err(|e| DataError::Parse(e.to_string()))
        })
        .collect()
}

/// Price feed reading an OHLC CSV file on every fetch.
pub struct CsvPriceFeed {
    path: PathBuf,
}

impl CsvPriceFeed {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::NoDataAvailable);
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

#[async_trait]
impl PriceFeed for CsvPriceFeed {
    async fn fetch_bars(&self) -> Result<Vec<RawBar>, DataError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_csv(&text)
    }

    fn name(&self) -> &str {
        "csv"
    }
}
