//! News and channel message records.

use serde::{Deserialize, Deserializer, Serialize};

/// A news article as consumed by sentiment scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl NewsItem {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Text scored for polarity: `title + ". " + description`.
    pub fn content(&self) -> String {
        format!("{}. {}", self.title, self.description)
    }
}

/// One broadcast message from the signal channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMessage {
    pub text: String,
}

impl ChannelMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

// Feeds send explicit nulls for absent descriptions.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_content() {
        let item = NewsItem::new("Gold rallies", "Bullion climbs on weak dollar");
        assert_eq!(item.content(), "Gold rallies. Bullion climbs on weak dollar");
    }

    #[test]
    fn test_news_null_description() {
        let item: NewsItem =
            serde_json::from_str(r#"{"title":"Gold flat","description":null}"#).unwrap();
        assert_eq!(item.description, "");
        assert_eq!(item.content(), "Gold flat. ");

        let item: NewsItem = serde_json::from_str(r#"{"title":"Only a title"}"#).unwrap();
        assert_eq!(item.description, "");
    }
}
