use crate::error::ApiError;
use async_trait::async_trait;
use chrono::NaiveDate;
use configuration::settings::MarketDataConfig;
use core_types::{DailyBar, Period, Ticker};
use std::time::Duration;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{DailySeriesResponse, RawDailyBar};

/// Alpha Vantage's `compact` size returns roughly this many trading days.
pub const COMPACT_DAYS: u64 = 100;

/// How much history to request from the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSize {
    Compact,
    Full,
}

impl OutputSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputSize::Compact => "compact",
            OutputSize::Full => "full",
        }
    }

    /// Picks the smallest size that still covers the period.
    pub fn for_period(period: &Period, today: NaiveDate) -> Self {
        match period {
            Period::OneYear | Period::FiveYears => OutputSize::Full,
            Period::Custom { start, .. } => {
                if (today - *start).num_days() > COMPACT_DAYS as i64 {
                    OutputSize::Full
                } else {
                    OutputSize::Compact
                }
            }
            _ => OutputSize::Compact,
        }
    }
}

/// The abstract source of real daily price history.
/// The analysis service only ever talks to this trait, so tests can swap in
/// a scripted implementation.
#[async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// A short name for logs.
    fn name(&self) -> &'static str;

    /// Fetches the daily series for `ticker`, oldest first.
    async fn fetch_daily(
        &self,
        ticker: &Ticker,
        size: OutputSize,
    ) -> Result<Vec<DailyBar>, ApiError>;
}

/// A concrete `MarketDataGateway` backed by Alpha Vantage's `TIME_SERIES_DAILY`.
#[derive(Clone)]
pub struct AlphaVantageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl AlphaVantageClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout,
        })
    }

    /// Builds a client from configuration, or `None` when no real credential
    /// is configured.
    pub fn from_config(config: &MarketDataConfig) -> Result<Option<Self>, ApiError> {
        match config.credential() {
            Some(key) => Self::new(key, config.base_url.clone(), config.timeout).map(Some),
            None => Ok(None),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify_transport(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            ApiError::Transport(e)
        }
    }
}

#[async_trait]
impl MarketDataGateway for AlphaVantageClient {
    fn name(&self) -> &'static str {
        "alpha-vantage"
    }

    async fn fetch_daily(
        &self,
        ticker: &Ticker,
        size: OutputSize,
    ) -> Result<Vec<DailyBar>, ApiError> {
        tracing::debug!(ticker = %ticker, size = size.as_str(), "Requesting daily series.");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", ticker.as_str()),
                ("outputsize", size.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| self.classify_transport(e))?;
        let body: DailySeriesResponse =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialization(e.to_string()))?;

        let bars = body.into_bars(ticker.as_str())?;
        tracing::debug!(ticker = %ticker, bars = bars.len(), "Received daily series.");
        Ok(bars)
    }
}
