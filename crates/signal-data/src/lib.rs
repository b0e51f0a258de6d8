//! Price, news and channel feeds.
//!
//! Network feeds (TwelveData, NewsAPI, Telegram) and offline file feeds used
//! to replay a cycle. All of them implement the feed traits from
//! `signal-core` and only parse; interpretation happens in the pipeline.

mod csv_source;
mod file;
mod newsapi;
mod telegram;
mod twelvedata;

pub use csv_source::CsvPriceFeed;
pub use file::{JsonNewsFile, TextChannelFile};
pub use newsapi::{parse_articles, NewsApiClient, NewsApiConfig};
pub use telegram::{parse_channel_posts, TelegramChannelClient, TelegramConfig};
pub use twelvedata::{parse_time_series, TwelveDataClient, TwelveDataConfig};

use signal_core::error::DataError;
use std::time::Duration;

/// Read a credential from the environment variable named by the config.
pub fn credential_from_env(var: &str) -> Result<String, DataError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(DataError::MissingCredential(var.to_string())),
    }
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, DataError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("xau-signal/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| DataError::Http(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credential() {
        let err = credential_from_env("XAU_SIGNAL_TEST_UNSET_CREDENTIAL").unwrap_err();
        assert!(matches!(err, DataError::MissingCredential(v) if v == "XAU_SIGNAL_TEST_UNSET_CREDENTIAL"));
    }
}
