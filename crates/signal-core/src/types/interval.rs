//! Bar interval definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interval of the bars served by the price feed.
///
/// Wire names follow the TwelveData `interval` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interval {
    #[serde(rename = "1min")]
    Minute1,
    #[serde(rename = "5min")]
    Minute5,
    #[serde(rename = "15min")]
    #[default]
    Minute15,
    #[serde(rename = "30min")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1day")]
    Daily,
    #[serde(rename = "1week")]
    Weekly,
    #[serde(rename = "1month")]
    Monthly,
}

impl Interval {
    /// Get the duration of the interval in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Interval::Minute1 => 60,
            Interval::Minute5 => 300,
            Interval::Minute15 => 900,
            Interval::Minute30 => 1800,
            Interval::Hour1 => 3600,
            Interval::Hour4 => 14400,
            Interval::Daily => 86400,
            Interval::Weekly => 604800,
            // Nominal 30-day month.
            Interval::Monthly => 2_592_000,
        }
    }

    /// Name used in feed query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Minute1 => "1min",
            Interval::Minute5 => "5min",
            Interval::Minute15 => "15min",
            Interval::Minute30 => "30min",
            Interval::Hour1 => "1h",
            Interval::Hour4 => "4h",
            Interval::Daily => "1day",
            Interval::Weekly => "1week",
            Interval::Monthly => "1month",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1m" | "1min" => Ok(Interval::Minute1),
            "5m" | "5min" => Ok(Interval::Minute5),
            "15m" | "15min" => Ok(Interval::Minute15),
            "30m" | "30min" => Ok(Interval::Minute30),
            "1h" | "1hour" => Ok(Interval::Hour1),
            "4h" | "4hour" => Ok(Interval::Hour4),
            "1d" | "1day" | "daily" => Ok(Interval::Daily),
            "1w" | "1week" | "weekly" => Ok(Interval::Weekly),
            "1mo" | "1month" | "monthly" => Ok(Interval::Monthly),
            _ => Err(format!("Invalid interval: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_parse() {
        assert_eq!(Interval::from_str("15min").unwrap(), Interval::Minute15);
        assert_eq!(Interval::from_str("15m").unwrap(), Interval::Minute15);
        assert_eq!(Interval::from_str("daily").unwrap(), Interval::Daily);
        assert!(Interval::from_str("90s").is_err());
    }

    #[test]
    fn test_interval_wire_name() {
        assert_eq!(Interval::default().to_string(), "15min");
        assert_eq!(Interval::Minute15.as_secs(), 900);
        let json = serde_json::to_string(&Interval::Hour1).unwrap();
        assert_eq!(json, "\"1h\"");
    }

    #[test]
    fn test_monthly_interval() {
        assert_eq!(Interval::from_str("1month").unwrap(), Interval::Monthly);
        assert_eq!(Interval::from_str("1mo").unwrap(), Interval::Monthly);
        assert_eq!(Interval::from_str("Monthly").unwrap(), Interval::Monthly);
        assert_eq!(Interval::Monthly.to_string(), "1month");
        assert_eq!(Interval::Monthly.as_secs(), 2_592_000);
        let parsed: Interval = serde_json::from_str("\"1month\"").unwrap();
        assert_eq!(parsed, Interval::Monthly);
    }
}
