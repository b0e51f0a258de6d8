//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, ChannelSettings, IndicatorSettings, LoggingConfig, NewsFeedSettings,
    PriceFeedSettings, SchedulerSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Load configuration from an optional file and the environment, then validate.
///
/// Environment keys use the `XAU_SIGNAL` prefix and `__` between levels,
/// e.g. `XAU_SIGNAL__SCHEDULER__REFRESH_SECS=30`.
pub fn load_config(path: &Path) -> Result<AppConfig, SettingsError> {
    let config = Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix("XAU_SIGNAL")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app: AppConfig = config.try_deserialize()?;
    app.validate()?;
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/xau-signal.toml")).unwrap();
        assert_eq!(config.channel.max_messages, 10);
    }

    #[test]
    fn test_file_overrides() {
        let path = std::env::temp_dir().join(format!("xau-signal-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[scheduler]\nrefresh_secs = 30\n\n[channel]\ninstrument = \"XAGUSD\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.scheduler.refresh_secs, 30);
        assert_eq!(config.channel.instrument, "XAGUSD");
        assert_eq!(config.indicators.macd_signal, 9);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("xau-signal-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[indicators]\nmacd_fast = 30\nmacd_slow = 26\n").unwrap();

        assert!(matches!(load_config(&path), Err(SettingsError::Invalid(_))));

        std::fs::remove_file(&path).unwrap();
    }
}
