//! TwelveData time series feed.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use signal_core::error::DataError;
use signal_core::traits::PriceFeed;
use signal_core::types::{Interval, RawBar};
use std::time::Duration;
use tracing::debug;

use crate::http_client;

/// TwelveData connection settings.
#[derive(Debug, Clone)]
pub struct TwelveDataConfig {
    pub base_url: String,
    pub symbol: String,
    pub interval: Interval,
    /// Number of bars requested (TwelveData default is 30)
    pub output_size: usize,
    pub api_key: String,
    pub timeout: Duration,
}

impl TwelveDataConfig {
    /// XAU/USD 15-minute bars from the public endpoint.
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: "https://api.twelvedata.com".to_string(),
            symbol: "XAU/USD".to_string(),
            interval: Interval::Minute15,
            output_size: 100,
            api_key,
            timeout: Duration::from_secs(10),
        }
    }
}

/// `time_series` response. Errors come back as 200s without `values`.
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    values: Option<Vec<RawBar>>,
    status: Option<String>,
    code: Option<i64>,
    message: Option<String>,
}

/// Parse a `time_series` body into raw bars (newest first, as served).
pub fn parse_time_series(body: &str) -> Result<Vec<RawBar>, DataError> {
    let response: TimeSeriesResponse =
        serde_json::from_str(body).map_err(|e| DataError::Parse(e.to_string()))?;

    match response.values {
        Some(values) => Ok(values),
        None => Err(DataError::Api {
            code: response.code.unwrap_or_default(),
            message: response
                .message
                .or(response.status)
                .unwrap_or_else(|| "response has no values".to_string()),
        }),
    }
}

/// Price feed backed by TwelveData.
pub struct TwelveDataClient {
    config: TwelveDataConfig,
    client: Client,
}

impl TwelveDataClient {
    pub fn new(config: TwelveDataConfig) -> Result<Self, DataError> {
        let client = http_client(config.timeout)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl PriceFeed for TwelveDataClient {
    async fn fetch_bars(&self) -> Result<Vec<RawBar>, DataError> {
        let url = format!("{}/time_series", self.config.base_url.trim_end_matches('/'));
        let params = [
            ("symbol", self.config.symbol.clone()),
            ("interval", self.config.interval.to_string()),
            ("outputsize", self.config.output_size.to_string()),
            ("apikey", self.config.api_key.clone()),
        ];

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            // reqwest errors carry the URL, which carries the key
            .map_err(|e| DataError::Http(e.without_url().to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| DataError::Http(e.without_url().to_string()))?;
        if !status.is_success() {
            return Err(DataError::Api {
                code: i64::from(status.as_u16()),
                message: body,
            });
        }

        let bars = parse_time_series(&body)?;
        debug!(symbol = %self.config.symbol, bars = bars.len(), "Fetched price bars");
        Ok(bars)
    }

    fn name(&self) -> &str {
        "twelvedata"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signal_core::types::{PriceSeriesBuilder, RawValue};

    const SAMPLE: &str = r#"{
        "meta": {"symbol": "XAU/USD", "interval": "15min", "currency_base": "Gold Spot", "type": "Physical Currency"},
        "values": [
            {"datetime": "2024-05-01 10:30:00", "open": "2330.10", "high": "2332.00", "low": "2329.50", "close": "2331.20"},
            {"datetime": "2024-05-01 10:15:00", "open": "2329.90", "high": "2331.00", "low": "2328.80", "close": "2330.10"}
        ],
        "status": "ok"
    }"#;

    #[test]
    fn test_parse_values() {
        let bars = parse_time_series(SAMPLE).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, Some(RawValue::Text("2331.20".into())));

        let series = PriceSeriesBuilder::default().build(&bars);
        assert_eq!(series.closes(), vec![2330.10, 2331.20]);
    }

    #[test]
    fn test_parse_error_payload() {
        let body = r#"{"code":401,"message":"**apikey** parameter is incorrect","status":"error"}"#;
        match parse_time_series(body) {
            Err(DataError::Api { code, message }) => {
                assert_eq!(code, 401);
                assert!(message.contains("apikey"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_time_series("<html>"),
            Err(DataError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let mut config = TwelveDataConfig::new("SECRETKEY123".to_string());
        config.base_url = "http://127.0.0.1:1".to_string();
        config.timeout = Duration::from_secs(2);
        let client = TwelveDataClient::new(config).unwrap();

        let err = client.fetch_bars().await.unwrap_err();
        assert!(matches!(err, DataError::Http(_)));
        assert!(!err.to_string().contains("SECRETKEY123"));
    }
}
