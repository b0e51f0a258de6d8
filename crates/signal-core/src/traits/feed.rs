//! Data feed trait definitions.
//!
//! Feeds own all I/O. They hand already-parsed records to the pipeline and
//! never interpret them.

use crate::error::DataError;
use crate::types::{ChannelMessage, NewsItem, RawBar};
use async_trait::async_trait;

/// Source of raw price bars for the configured instrument and interval.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch the latest bars, in whatever order the source serves them.
    async fn fetch_bars(&self) -> Result<Vec<RawBar>, DataError>;

    /// Get the feed name.
    fn name(&self) -> &str;
}

/// Source of topic-filtered news articles.
#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// Fetch articles, most recent first.
    async fn fetch_news(&self) -> Result<Vec<NewsItem>, DataError>;

    /// Get the feed name.
    fn name(&self) -> &str;
}

/// Source of broadcast messages from the signal channel.
#[async_trait]
pub trait ChannelFeed: Send + Sync {
    /// Fetch up to `limit` messages, most recent first.
    async fn fetch_messages(&self, limit: usize) -> Result<Vec<ChannelMessage>, DataError>;

    /// Get the feed name.
    fn name(&self) -> &str;
}
