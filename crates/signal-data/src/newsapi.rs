//! NewsAPI `everything` feed.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use signal_core::error::DataError;
use signal_core::traits::NewsFeed;
use signal_core::types::NewsItem;
use std::time::Duration;
use tracing::debug;

use crate::http_client;

/// NewsAPI connection settings.
#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    pub base_url: String,
    pub query: String,
    pub language: String,
    pub sort_by: String,
    /// Articles requested per call
    pub page_size: usize,
    pub api_key: String,
    pub timeout: Duration,
}

impl NewsApiConfig {
    /// Latest English gold headlines.
    pub fn new(api_key: String) -> Self {
        Self {
            base_url: "https://newsapi.org".to_string(),
            query: "gold OR XAUUSD".to_string(),
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
            page_size: 20,
            api_key,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: Option<String>,
    code: Option<String>,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NewsItem>,
}

/// Parse an `everything` body into news items, most recent first.
///
/// A body without `articles` is an empty result, not an error, unless
/// NewsAPI flags it with `"status": "error"`.
pub fn parse_articles(body: &str) -> Result<Vec<NewsItem>, DataError> {
    let response: EverythingResponse =
        serde_json::from_str(body).map_err(|e| DataError::Parse(e.to_string()))?;

    if response.status.as_deref() == Some("error") {
        return Err(DataError::Unavailable(format!(
            "{}: {}",
            response.code.unwrap_or_else(|| "error".to_string()),
            response.message.unwrap_or_default()
        )));
    }

    Ok(response.articles)
}

/// News feed backed by NewsAPI.
pub struct NewsApiClient {
    config: NewsApiConfig,
    client: Client,
}

impl NewsApiClient {
    pub fn new(config: NewsApiConfig) -> Result<Self, DataError> {
        let client = http_client(config.timeout)?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl NewsFeed for NewsApiClient {
    async fn fetch_news(&self) -> Result<Vec<NewsItem>, DataError> {
        let url = format!("{}/v2/everything", self.config.base_url.trim_end_matches('/'));
        let params = [
            ("q", self.config.query.clone()),
            ("language", self.config.language.clone()),
            ("sortBy", self.config.sort_by.clone()),
            ("pageSize", self.config.page_size.to_string()),
            ("apiKey", self.config.api_key.clone()),
        ];

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            // reqwest errors carry the URL, which carries the key
            .map_err(|e| DataError::Http(e.without_url().to_string()))?;

        // NewsAPI reports errors in the body with a non-2xx status
        let body = resp
            .text()
            .await
            .map_err(|e| DataError::Http(e.without_url().to_string()))?;

        let articles = parse_articles(&body)?;
        debug!(query = %self.config.query, articles = articles.len(), "Fetched news");
        Ok(articles)
    }

    fn name(&self) -> &str {
        "newsapi"
    }
}
