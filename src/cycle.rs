//! One refresh cycle: fetch all feeds, evaluate, report.

use anyhow::{Context, Result};
use signal_config::AppConfig;
use signal_core::error::{DataError, FusionError};
use signal_core::traits::{ChannelFeed, NewsFeed, PriceFeed};
use signal_core::types::PriceSeriesBuilder;
use signal_data::{
    credential_from_env, CsvPriceFeed, JsonNewsFile, NewsApiClient, NewsApiConfig,
    TelegramChannelClient, TelegramConfig, TextChannelFile, TwelveDataClient, TwelveDataConfig,
};
use signal_fusion::{ChannelSignalParser, SignalPipeline};
use signal_indicators::IndicatorEngine;
use signal_monitor::CycleReport;
use signal_sentiment::SentimentAggregator;
use std::time::Duration;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::cli::SourceArgs;

/// Feeds plus the pipeline they feed.
///
/// A missing news or channel feed behaves like one that failed.
pub struct RefreshCycle {
    price: Box<dyn PriceFeed>,
    news: Option<Box<dyn NewsFeed>>,
    channel: Option<Box<dyn ChannelFeed>>,
    pipeline: SignalPipeline,
    symbol: String,
}

impl RefreshCycle {
    pub fn new(
        price: Box<dyn PriceFeed>,
        news: Option<Box<dyn NewsFeed>>,
        channel: Option<Box<dyn ChannelFeed>>,
        pipeline: SignalPipeline,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            price,
            news,
            channel,
            pipeline,
            symbol: symbol.into(),
        }
    }

    /// Build feeds and pipeline from configuration.
    ///
    /// Offline sources replace the matching network feed. A missing price
    /// credential is fatal; missing news or channel credentials only degrade.
    pub fn from_config(config: &AppConfig, sources: &SourceArgs) -> Result<Self> {
        let price: Box<dyn PriceFeed> = match &sources.prices {
            Some(path) => Box::new(
                CsvPriceFeed::new(path)
                    .with_context(|| format!("Price file not found: {}", path.display()))?,
            ),
            None => {
                let pf = &config.price_feed;
                let api_key = credential_from_env(&pf.api_key_env)?;
                Box::new(TwelveDataClient::new(TwelveDataConfig {
                    base_url: pf.base_url.clone(),
                    symbol: pf.symbol.clone(),
                    interval: pf.interval,
                    output_size: pf.output_size,
                    api_key,
                    timeout: Duration::from_secs(pf.timeout_secs),
                })?)
            }
        };

        let news: Option<Box<dyn NewsFeed>> = match &sources.news {
            Some(path) => Some(Box::new(
                JsonNewsFile::new(path)
                    .with_context(|| format!("News file not found: {}", path.display()))?,
            )),
            None => {
                let nf = &config.news_feed;
                match credential_from_env(&nf.api_key_env) {
                    Ok(api_key) => Some(Box::new(NewsApiClient::new(NewsApiConfig {
                        base_url: nf.base_url.clone(),
                        query: nf.query.clone(),
                        language: nf.language.clone(),
                        sort_by: nf.sort_by.clone(),
                        page_size: nf.max_items,
                        api_key,
                        timeout: Duration::from_secs(nf.timeout_secs),
                    })?)),
                    Err(e) => {
                        warn!(error = %e, "News feed disabled, sentiment will be neutral");
                        None
                    }
                }
            }
        };

        let channel: Option<Box<dyn ChannelFeed>> = match &sources.messages {
            Some(path) => Some(Box::new(
                TextChannelFile::new(path)
                    .with_context(|| format!("Messages file not found: {}", path.display()))?,
            )),
            None => {
                let ch = &config.channel;
                match credential_from_env(&ch.bot_token_env) {
                    Ok(bot_token) => Some(Box::new(TelegramChannelClient::new(TelegramConfig {
                        base_url: ch.base_url.clone(),
                        bot_token,
                        channel: ch.channel.clone(),
                        timeout: Duration::from_secs(ch.timeout_secs),
                    })?)),
                    Err(e) => {
                        warn!(error = %e, "Channel feed disabled, signal will be Uncertain");
                        None
                    }
                }
            }
        };

        Ok(Self::new(
            price,
            news,
            channel,
            pipeline_from_config(config)?,
            config.price_feed.symbol.clone(),
        ))
    }

    /// Run one cycle. Never fails: an unusable price series skips the cycle.
    pub async fn run_once(&self) -> CycleReport {
        let cycle_id = Uuid::new_v4();
        self.run_cycle(cycle_id)
            .instrument(info_span!("cycle", %cycle_id))
            .await
    }

    async fn run_cycle(&self, cycle_id: Uuid) -> CycleReport {
        let limit = self.pipeline.parser().max_messages();

        let news = async {
            match &self.news {
                Some(feed) => feed.fetch_news().await,
                None => Err(DataError::Unavailable("news feed not configured".into())),
            }
        };
        let messages = async {
            match &self.channel {
                Some(feed) => feed.fetch_messages(limit).await,
                None => Err(DataError::Unavailable("channel feed not configured".into())),
            }
        };
        let (bars, news, messages) = tokio::join!(self.price.fetch_bars(), news, messages);

        let (bars, price_error) = match bars {
            Ok(bars) => (bars, None),
            Err(e) => {
                error!(feed = self.price.name(), error = %e, "Price feed failed");
                (Vec::new(), Some(e))
            }
        };
        let news = news.unwrap_or_else(|e| {
            warn!(error = %e, "News unavailable, sentiment defaults to neutral");
            Vec::new()
        });
        let messages = match messages {
            Ok(messages) => Some(messages),
            Err(e) => {
                warn!(error = %e, "Channel unavailable, signal defaults to Uncertain");
                None
            }
        };

        let series = self.pipeline.build_series(&bars);
        match self
            .pipeline
            .evaluate_series(&series, &news, messages.as_deref())
        {
            Ok(evaluation) => {
                info!(
                    last_close = ?series.last().map(|b| b.close),
                    rsi = ?evaluation.indicators.rsi,
                    macd_histogram = ?evaluation.indicators.macd_histogram,
                    sentiment = evaluation.sentiment,
                    signal = %evaluation.signal,
                    decision = %evaluation.decision,
                    "Cycle complete"
                );
                CycleReport::evaluated(cycle_id, &series, evaluation)
            }
            Err(e) => {
                let reason = match (&e, price_error) {
                    (FusionError::EmptySeries, Some(cause)) => format!("{} ({})", e, cause),
                    _ => e.to_string(),
                };
                error!(reason = %reason, "Cycle skipped");
                CycleReport::skipped(cycle_id, &self.symbol, reason)
            }
        }
    }
}

/// Pipeline with the configured symbol, periods, caps and instrument.
pub fn pipeline_from_config(config: &AppConfig) -> Result<SignalPipeline> {
    let ind = &config.indicators;
    let engine =
        IndicatorEngine::try_new(ind.rsi_period, ind.macd_fast, ind.macd_slow, ind.macd_signal)?;

    Ok(SignalPipeline::with_parts(
        PriceSeriesBuilder::new(config.price_feed.symbol.clone(), config.price_feed.interval),
        engine,
        SentimentAggregator::new().with_max_items(config.news_feed.max_items),
        ChannelSignalParser::new(&config.channel.instrument, config.channel.max_messages),
    ))
}
