//! Telegram channel feed over the Bot API.
//!
//! The bot must be a member of the channel; channel posts then arrive as
//! `channel_post` updates from `getUpdates`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use signal_core::error::DataError;
use signal_core::traits::ChannelFeed;
use signal_core::types::ChannelMessage;
use std::time::Duration;
use tracing::debug;

use crate::http_client;

/// Telegram connection settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub base_url: String,
    pub bot_token: String,
    /// Channel username (with or without `@`) or numeric chat id
    pub channel: String,
    pub timeout: Duration,
}

impl TelegramConfig {
    pub fn new(bot_token: String, channel: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.telegram.org".to_string(),
            bot_token,
            channel: channel.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
    error_code: Option<i64>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    channel_post: Option<Post>,
}

#[derive(Debug, Deserialize)]
struct Post {
    message_id: i64,
    date: i64,
    chat: Chat,
    text: Option<String>,
    caption: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
    username: Option<String>,
}

impl Chat {
    fn is(&self, channel: &str) -> bool {
        let wanted = channel.trim_start_matches('@');
        self.username
            .as_deref()
            .is_some_and(|u| u.eq_ignore_ascii_case(wanted))
            || self.id.to_string() == wanted
    }
}

/// Parse a `getUpdates` body into the channel's messages, newest first.
///
/// Posts from other chats and posts without text or caption are dropped.
pub fn parse_channel_posts(
    body: &str,
    channel: &str,
    limit: usize,
) -> Result<Vec<ChannelMessage>, DataError> {
    let response: UpdatesResponse =
        serde_json::from_str(body).map_err(|e| DataError::Parse(e.to_string()))?;

    if !response.ok {
        return Err(DataError::Api {
            code: response.error_code.unwrap_or_default(),
            message: response.description.unwrap_or_default(),
        });
    }

    let mut posts: Vec<Post> = response
        .result
        .into_iter()
        .filter_map(|u| u.channel_post)
        .filter(|p| p.chat.is(channel))
        .collect();
    posts.sort_by(|a, b| (b.date, b.message_id).cmp(&(a.date, a.message_id)));

    Ok(posts
        .into_iter()
        .filter_map(|p| p.text.or(p.caption))
        .take(limit)
        .map(ChannelMessage::new)
        .collect())
}

/// Query for `getUpdates`: channel posts only, from the tail of the queue.
///
/// Without an offset the Bot API serves the oldest unconfirmed updates first.
fn updates_query() -> [(&'static str, &'static str); 2] {
    [
        ("offset", "-100"),
        ("allowed_updates", r#"["channel_post"]"#),
    ]
}

/// Channel feed backed by the Telegram Bot API.
pub struct TelegramChannelClient {
    config: TelegramConfig,
    client: Client,
}

impl TelegramChannelClient {
    pub fn new(config: TelegramConfig) -> Result<Self, DataError> {
        let client = http_client(config.timeout)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl ChannelFeed for TelegramChannelClient {
    async fn fetch_messages(&self, limit: usize) -> Result<Vec<ChannelMessage>, DataError> {
        let url = format!(
            "{}/bot{}/getUpdates",
            self.config.base_url.trim_end_matches('/'),
            self.config.bot_token
        );

        let resp = self
            .client
            .get(&url)
            .query(&updates_query())
            .send()
            .await
            // reqwest errors carry the URL, which carries the token
            .map_err(|e| DataError::Http(e.without_url().to_string()))?;

        let body = resp
            .text()
            .await
            .map_err(|e| DataError::Http(e.without_url().to_string()))?;

        let messages = parse_channel_posts(&body, &self.config.channel, limit)?;
        debug!(channel = %self.config.channel, messages = messages.len(), "Fetched channel messages");
        Ok(messages)
    }

    fn name(&self) -> &str {
        "telegram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "ok": true,
        "result": [
            {"update_id": 1, "channel_post": {"message_id": 10, "date": 1714550000, "chat": {"id": -1001, "username": "gary_thetrader", "type": "channel"}, "text": "XAUUSD SELL 2340"}},
            {"update_id": 2, "channel_post": {"message_id": 11, "date": 1714550900, "chat": {"id": -1001, "username": "gary_thetrader", "type": "channel"}, "caption": "XAUUSD BUY 2330"}},
            {"update_id": 3, "channel_post": {"message_id": 5, "date": 1714551000, "chat": {"id": -1002, "username": "other", "type": "channel"}, "text": "XAUUSD SELL"}},
            {"update_id": 4, "message": {"message_id": 1, "date": 1714551100, "chat": {"id": 42, "type": "private"}, "text": "hi"}},
            {"update_id": 5, "channel_post": {"message_id": 12, "date": 1714551200, "chat": {"id": -1001, "username": "gary_thetrader", "type": "channel"}}}
        ]
    }"#;

    #[test]
    fn test_newest_first_and_filtered() {
        let messages = parse_channel_posts(SAMPLE, "@gary_thetrader", 10).unwrap();
        assert_eq!(
            messages,
            vec![
                ChannelMessage::new("XAUUSD BUY 2330"),
                ChannelMessage::new("XAUUSD SELL 2340"),
            ]
        );
    }

    #[test]
    fn test_limit() {
        let messages = parse_channel_posts(SAMPLE, "gary_thetrader", 1).unwrap();
        assert_eq!(messages, vec![ChannelMessage::new("XAUUSD BUY 2330")]);
    }

    #[test]
    fn test_numeric_chat_id() {
        let messages = parse_channel_posts(SAMPLE, "-1002", 10).unwrap();
        assert_eq!(messages, vec![ChannelMessage::new("XAUUSD SELL")]);
    }

    #[test]
    fn test_api_error() {
        let body = r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#;
        assert!(matches!(
            parse_channel_posts(body, "gary_thetrader", 10),
            Err(DataError::Api { code: 401, .. })
        ));
    }

    #[test]
    fn test_updates_query_reads_queue_tail() {
        let query = updates_query();
        assert!(query.contains(&("offset", "-100")));
        assert!(query.contains(&("allowed_updates", r#"["channel_post"]"#)));
    }
}
