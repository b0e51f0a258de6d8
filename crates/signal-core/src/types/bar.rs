//! Price bars, the raw records feeds hand over, and the series builder.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Interval;
use crate::error::SeriesError;

const MINUTE_MS: i64 = 60_000;

/// A field value as delivered by a feed: JSON number or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Untyped bar record: every field may be absent or malformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    #[serde(default, alias = "date", alias = "timestamp")]
    pub datetime: Option<RawValue>,
    #[serde(default)]
    pub open: Option<RawValue>,
    #[serde(default)]
    pub high: Option<RawValue>,
    #[serde(default)]
    pub low: Option<RawValue>,
    #[serde(default)]
    pub close: Option<RawValue>,
}

impl RawBar {
    /// Create a fully populated record.
    pub fn new(
        datetime: impl Into<RawValue>,
        open: impl Into<RawValue>,
        high: impl Into<RawValue>,
        low: impl Into<RawValue>,
        close: impl Into<RawValue>,
    ) -> Self {
        Self {
            datetime: Some(datetime.into()),
            open: Some(open.into()),
            high: Some(high.into()),
            low: Some(low.into()),
            close: Some(close.into()),
        }
    }
}

/// Validated OHLC bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Unix timestamp in milliseconds, minute resolution
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
}

/// Ordered, immutable series of bars for one instrument.
///
/// Timestamps are strictly increasing. Only [`PriceSeriesBuilder`] creates
/// non-empty series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    /// Instrument identifier
    pub symbol: String,
    /// Bar interval
    pub interval: Interval,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Create an empty series.
    pub fn empty(symbol: impl Into<String>, interval: Interval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            bars: Vec::new(),
        }
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars, oldest first.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Get the most recent bar.
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &PriceBar> {
        self.bars.iter()
    }
}

/// Normalizes raw bar records into a [`PriceSeries`].
#[derive(Debug, Clone)]
pub struct PriceSeriesBuilder {
    symbol: String,
    interval: Interval,
}

impl Default for PriceSeriesBuilder {
    fn default() -> Self {
        Self::new("XAU/USD", Interval::Minute15)
    }
}

impl PriceSeriesBuilder {
    /// Create a builder for the given instrument and interval.
    pub fn new(symbol: impl Into<String>, interval: Interval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
        }
    }

    /// Build a series, returning an empty one when the batch is unusable.
    pub fn build(&self, records: &[RawBar]) -> PriceSeries {
        match self.try_build(records) {
            Ok(series) => series,
            Err(e) => {
                warn!(symbol = %self.symbol, error = %e, "Discarding price batch");
                PriceSeries::empty(self.symbol.clone(), self.interval)
            }
        }
    }

    /// Build a series, reporting why a batch is unusable.
    ///
    /// Records may arrive in any order. One malformed record rejects the
    /// whole batch. Duplicate timestamps keep the first record in input order.
    pub fn try_build(&self, records: &[RawBar]) -> Result<PriceSeries, SeriesError> {
        if records.is_empty() {
            return Err(SeriesError::Empty);
        }

        let mut bars = records
            .iter()
            .enumerate()
            .map(|(index, record)| convert(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        bars.sort_by_key(|b| b.timestamp);
        let before = bars.len();
        bars.dedup_by_key(|b| b.timestamp);
        if bars.len() < before {
            debug!(dropped = before - bars.len(), "Dropped duplicate timestamps");
        }

        Ok(PriceSeries {
            symbol: self.symbol.clone(),
            interval: self.interval,
            bars,
        })
    }
}

fn convert(index: usize, record: &RawBar) -> Result<PriceBar, SeriesError> {
    let datetime = record
        .datetime
        .as_ref()
        .ok_or(SeriesError::MissingField {
            index,
            field: "datetime",
        })?;
    let timestamp = match datetime {
        RawValue::Number(n) if n.is_finite() => unix_to_millis(*n as i64),
        RawValue::Number(_) => None,
        RawValue::Text(s) => parse_timestamp(s),
    };
    let timestamp = timestamp
        .and_then(|ts| ts.checked_sub(ts.rem_euclid(MINUTE_MS)))
        .ok_or_else(|| SeriesError::InvalidTimestamp {
            index,
            value: match datetime {
                RawValue::Number(n) => n.to_string(),
                RawValue::Text(s) => s.clone(),
            },
        })?;

    Ok(PriceBar {
        timestamp,
        open: price(index, "open", record.open.as_ref())?,
        high: price(index, "high", record.high.as_ref())?,
        low: price(index, "low", record.low.as_ref())?,
        close: price(index, "close", record.close.as_ref())?,
    })
}

fn price(index: usize, field: &'static str, value: Option<&RawValue>) -> Result<f64, SeriesError> {
    let value = match value.ok_or(SeriesError::MissingField { index, field })? {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s.trim().parse::<f64>().map_err(|_| SeriesError::InvalidNumber {
            index,
            field,
            value: s.clone(),
        })?,
    };

    if !value.is_finite() || value <= 0.0 {
        return Err(SeriesError::InvalidPrice {
            index,
            field,
            value,
        });
    }
    Ok(value)
}

/// Parse the timestamp formats served by price feeds into Unix milliseconds.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(value, format) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp_millis());
        }
    }

    value.parse::<i64>().ok().and_then(unix_to_millis)
}

// Values above 10 digits are already milliseconds. `None` when seconds
// overflow on conversion.
fn unix_to_millis(ts: i64) -> Option<i64> {
    if ts > 10_000_000_000 {
        Some(ts)
    } else {
        ts.checked_mul(1000)
    }
}
