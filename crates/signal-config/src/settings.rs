//! Configuration structures.

use serde::{Deserialize, Serialize};
use signal_core::types::Interval;

use crate::SettingsError;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub price_feed: PriceFeedSettings,
    #[serde(default)]
    pub news_feed: NewsFeedSettings,
    #[serde(default)]
    pub channel: ChannelSettings,
    #[serde(default)]
    pub indicators: IndicatorSettings,
    #[serde(default)]
    pub scheduler: SchedulerSettings,
}

impl AppConfig {
    /// Reject values no cycle can run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: &str| Err(SettingsError::Invalid(msg.to_string()));

        let ind = &self.indicators;
        if ind.rsi_period == 0 {
            return invalid("indicators.rsi_period must be positive");
        }
        if ind.macd_fast == 0 || ind.macd_slow == 0 || ind.macd_signal == 0 {
            return invalid("indicators.macd_* spans must be positive");
        }
        if ind.macd_fast >= ind.macd_slow {
            return invalid("indicators.macd_fast must be below indicators.macd_slow");
        }
        if self.scheduler.refresh_secs == 0 {
            return invalid("scheduler.refresh_secs must be positive");
        }
        if self.price_feed.output_size == 0 {
            return invalid("price_feed.output_size must be positive");
        }
        if self.news_feed.max_items == 0 {
            return invalid("news_feed.max_items must be positive");
        }
        if self.channel.max_messages == 0 {
            return invalid("channel.max_messages must be positive");
        }
        if self.channel.instrument.trim().is_empty() {
            return invalid("channel.instrument must not be empty");
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return invalid("logging.format must be \"pretty\" or \"json\"");
        }
        Ok(())
    }

    /// Effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "xau-signal".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Directory-qualified file prefix for the daily rolling log
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// TwelveData price feed settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceFeedSettings {
    pub base_url: String,
    pub symbol: String,
    pub interval: Interval,
    pub output_size: usize,
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for PriceFeedSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.twelvedata.com".to_string(),
            symbol: "XAU/USD".to_string(),
            interval: Interval::Minute15,
            output_size: 100,
            api_key_env: "TWELVEDATA_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

/// NewsAPI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsFeedSettings {
    pub base_url: String,
    pub query: String,
    pub language: String,
    pub sort_by: String,
    /// Articles fetched and scored per cycle
    pub max_items: usize,
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for NewsFeedSettings {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            query: "gold OR XAUUSD".to_string(),
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
            max_items: 5,
            api_key_env: "NEWS_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Telegram signal channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    pub base_url: String,
    pub channel: String,
    /// Instrument tag a message must mention
    pub instrument: String,
    pub max_messages: usize,
    pub bot_token_env: String,
    pub timeout_secs: u64,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.telegram.org".to_string(),
            channel: "gary_thetrader".to_string(),
            instrument: "XAUUSD".to_string(),
            max_messages: 10,
            bot_token_env: "TELEGRAM_BOT_TOKEN".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Indicator periods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

/// Refresh loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    pub refresh_secs: u64,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self { refresh_secs: 60 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scheduler.refresh_secs, 60);
        assert_eq!(config.indicators.rsi_period, 14);
        assert_eq!(config.price_feed.interval, Interval::Minute15);
    }

    #[test]
    fn test_rejects_bad_periods() {
        let mut config = AppConfig::default();
        config.indicators.macd_fast = 26;
        assert!(matches!(config.validate(), Err(SettingsError::Invalid(_))));

        let mut config = AppConfig::default();
        config.indicators.rsi_period = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.scheduler.refresh_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_section() {
        let config: AppConfig = toml::from_str("[indicators]\nrsi_period = 7\n").unwrap();
        assert_eq!(config.indicators.rsi_period, 7);
        assert_eq!(config.indicators.macd_slow, 26);
        assert_eq!(config.channel.instrument, "XAUUSD");
    }

    #[test]
    fn test_toml_output() {
        let text = AppConfig::default().to_toml().unwrap();
        assert!(text.contains("[scheduler]"));
        assert!(text.contains("interval = \"15min\""));
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.news_feed.max_items, 5);
    }
}
