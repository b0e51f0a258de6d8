//! File-backed news and channel feeds for offline cycles.

use async_trait::async_trait;
use signal_core::error::DataError;
use signal_core::traits::{ChannelFeed, NewsFeed};
use signal_core::types::{ChannelMessage, NewsItem};
use std::path::{Path, PathBuf};

use crate::newsapi::parse_articles;

fn existing(path: &Path) -> Result<PathBuf, DataError> {
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(DataError::NoDataAvailable)
    }
}

/// News read from JSON: a bare array of articles or a saved NewsAPI response.
pub struct JsonNewsFile {
    path: PathBuf,
}

impl JsonNewsFile {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        Ok(Self {
            path: existing(path.as_ref())?,
        })
    }
}

pub(crate) fn parse_news_json(text: &str) -> Result<Vec<NewsItem>, DataError> {
    if text.trim_start().starts_with('[') {
        serde_json::from_str(text).map_err(|e| DataError::Parse(e.to_string()))
    } else {
        parse_articles(text)
    }
}

#[async_trait]
impl NewsFeed for JsonNewsFile {
    async fn fetch_news(&self) -> Result<Vec<NewsItem>, DataError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_news_json(&text)
    }

    fn name(&self) -> &str {
        "news-file"
    }
}

/// Channel messages read from text, one per line, newest first.
pub struct TextChannelFile {
    path: PathBuf,
}

impl TextChannelFile {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        Ok(Self {
            path: existing(path.as_ref())?,
        })
    }
}

pub(crate) fn parse_message_lines(text: &str, limit: usize) -> Vec<ChannelMessage> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(limit)
        .map(ChannelMessage::new)
        .collect()
}

#[async_trait]
impl ChannelFeed for TextChannelFile {
    async fn fetch_messages(&self, limit: usize) -> Result<Vec<ChannelMessage>, DataError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(parse_message_lines(&text, limit))
    }

    fn name(&self) -> &str {
        "channel-file"
    }
}
