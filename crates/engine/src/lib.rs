//! # Lunar Markets Analysis Service
//!
//! Wires the data sources, the moon-phase classifier and the calculators
//! together. Every request follows the same path:
//!
//! gateway (or synthetic generator) → window → classify → insights / strategies.
//!
//! The service is stateless per request and reads no clock: callers pass
//! `today` in explicitly.

use crate::error::EngineError;
use analytics::InsightsEngine;
use api_client::{AlphaVantageClient, MarketDataGateway, OutputSize};
use backtester::create_generator;
use chrono::NaiveDate;
use configuration::{BacktestConfig, Config, SyntheticConfig};
use core_types::{ClassifierId, CoreError, DailyBar, DataSource, MoonPhase, Period, Ticker};
use futures::future::join_all;
use lunar::{PhaseClassifier, annotate, create_classifier, transitions};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use timeseries::{SyntheticSeriesGenerator, ticker_seed, window};

pub mod error;
pub mod results;

pub use results::{
    AnalysisResult, ComparisonResult, ComparisonRow, InsightsResult, StrategyReportResult,
    TickerPerformance,
};

/// The most tickers a single comparison may hold.
pub const MAX_COMPARISON_TICKERS: usize = 5;

/// Raw bars for one ticker and where they came from.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub bars: Vec<DailyBar>,
    pub source: DataSource,
}

/// The central orchestrator behind the HTTP and CLI front ends.
pub struct AnalysisService {
    gateway: Option<Arc<dyn MarketDataGateway>>,
    gateway_timeout: Duration,
    classifier: Box<dyn PhaseClassifier>,
    generator: SyntheticSeriesGenerator,
    synthetic: SyntheticConfig,
    backtest: BacktestConfig,
    insights: InsightsEngine,
}

impl AnalysisService {
    /// Creates a service around an explicit gateway. `None` means synthetic data only.
    pub fn new(config: &Config, gateway: Option<Arc<dyn MarketDataGateway>>) -> Self {
        Self {
            gateway,
            gateway_timeout: config.market_data.timeout,
            classifier: create_classifier(config.analysis.classifier),
            generator: SyntheticSeriesGenerator::new(),
            synthetic: config.synthetic.clone(),
            backtest: config.backtest.clone(),
            insights: InsightsEngine::new(),
        }
    }

    /// Creates a service using Alpha Vantage when a real credential is configured.
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let gateway = AlphaVantageClient::from_config(&config.market_data)?
            .map(|client| Arc::new(client) as Arc<dyn MarketDataGateway>);
        match &gateway {
            Some(gateway) => tracing::info!(gateway = gateway.name(), "Real market data enabled."),
            None => {
                tracing::info!("No market data credential configured. Serving synthetic series.")
            }
        }
        Ok(Self::new(config, gateway))
    }

    pub fn classifier_name(&self) -> &'static str {
        self.classifier.name()
    }

    /// Fetches the raw series for a request, falling back to a synthetic one.
    ///
    /// The gateway gets a single attempt bounded by the configured timeout. Any
    /// failure is logged and answered with generated bars instead.
    pub async fn load_series(
        &self,
        ticker: &Ticker,
        period: &Period,
        today: NaiveDate,
    ) -> LoadedSeries {
        if let Some(gateway) = &self.gateway {
            let size = OutputSize::for_period(period, today);
            let fetch = gateway.fetch_daily(ticker, size);
            match tokio::time::timeout(self.gateway_timeout, fetch).await {
                Ok(Ok(bars)) => {
                    return LoadedSeries {
                        bars,
                        source: DataSource::AlphaVantage,
                    };
                }
                Ok(Err(e)) => tracing::warn!(
                    ticker = %ticker,
                    kind = e.kind(),
                    error = %e,
                    "Market data unavailable. Falling back to a synthetic series."
                ),
                Err(_) => tracing::warn!(
                    ticker = %ticker,
                    kind = "timeout",
                    timeout = ?self.gateway_timeout,
                    "Market data request timed out. Falling back to a synthetic series."
                ),
            }
        }

        LoadedSeries {
            bars: self.synthetic_series(ticker, period, today),
            source: DataSource::Synthetic,
        }
    }

    fn synthetic_series(
        &self,
        ticker: &Ticker,
        period: &Period,
        today: NaiveDate,
    ) -> Vec<DailyBar> {
        let (span, end) = period.series_span(today);
        let days = span.min(self.synthetic.max_days);
        let mut rng = match self.synthetic.seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ ticker_seed(ticker)),
            None => StdRng::from_entropy(),
        };
        self.generator.generate(ticker, days, end, &mut rng)
    }

    /// `GET /api/stock/:ticker`: the windowed series with a moon phase per bar.
    pub async fn annotated_series(
        &self,
        ticker: &Ticker,
        period: &Period,
        today: NaiveDate,
    ) -> Result<AnalysisResult, EngineError> {
        let loaded = self.load_series(ticker, period, today).await;
        let data = annotate(self.classifier.as_ref(), window(&loaded.bars, period, today));
        tracing::info!(
            ticker = %ticker,
            period = %period,
            bars = data.len(),
            source = ?loaded.source,
            "Prepared annotated series."
        );

        Ok(AnalysisResult {
            ticker: ticker.clone(),
            period: *period,
            transitions: transitions(&data),
            data,
            mock_data: loaded.source.is_synthetic(),
            source: loaded.source,
            classifier: self.classifier.name().to_string(),
        })
    }

    pub async fn insights(
        &self,
        ticker: &Ticker,
        period: &Period,
        today: NaiveDate,
    ) -> Result<InsightsResult, EngineError> {
        let series = self.annotated_series(ticker, period, today).await?;
        let insights = self.insights.calculate(&series.data)?;
        Ok(InsightsResult {
            ticker: series.ticker,
            period: series.period,
            insights,
            mock_data: series.mock_data,
        })
    }

    pub async fn strategy_report(
        &self,
        ticker: &Ticker,
        period: &Period,
        today: NaiveDate,
    ) -> Result<StrategyReportResult, EngineError> {
        let series = self.annotated_series(ticker, period, today).await?;
        let seed = self.backtest.seed.map(|seed| seed ^ ticker_seed(ticker));
        let mut generator = create_generator(self.backtest.mode, seed);
        let report = generator.generate(&series.data)?;
        tracing::info!(ticker = %ticker, mode = report.mode.as_str(), "Generated strategy report.");

        Ok(StrategyReportResult {
            ticker: series.ticker,
            period: series.period,
            mode: report.mode,
            strategies: report.strategies,
            mock_data: series.mock_data,
        })
    }

    /// Loads up to five tickers concurrently and merges their closes by date.
    ///
    /// Duplicate tickers are dropped, keeping the first occurrence.
    pub async fn compare(
        &self,
        tickers: &[Ticker],
        period: &Period,
        today: NaiveDate,
    ) -> Result<ComparisonResult, EngineError> {
        let mut unique: Vec<Ticker> = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            if !unique.contains(ticker) {
                unique.push(ticker.clone());
            }
        }
        if unique.is_empty() {
            return Err(
                CoreError::invalid_input("tickers", "at least one ticker is required").into(),
            );
        }
        if unique.len() > MAX_COMPARISON_TICKERS {
            return Err(CoreError::invalid_input(
                "tickers",
                format!(
                    "at most {MAX_COMPARISON_TICKERS} tickers can be compared, got {}",
                    unique.len()
                ),
            )
            .into());
        }

        let results = join_all(
            unique
                .iter()
                .map(|ticker| self.annotated_series(ticker, period, today)),
        )
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

        let mut rows: BTreeMap<NaiveDate, ComparisonRow> = BTreeMap::new();
        let mut performance = Vec::with_capacity(results.len());
        for result in &results {
            for bar in &result.data {
                rows.entry(bar.date())
                    .or_insert_with(|| ComparisonRow {
                        date: bar.date(),
                        closes: BTreeMap::new(),
                        moon_phase: bar.moon_phase,
                    })
                    .closes
                    .insert(result.ticker.clone(), bar.close());
            }

            let total_return_pct = match (result.data.first(), result.data.last()) {
                (Some(first), Some(last)) => (last.close() / first.close() - 1.0) * 100.0,
                _ => 0.0,
            };
            performance.push(TickerPerformance {
                ticker: result.ticker.clone(),
                total_return_pct,
                mock_data: result.mock_data,
            });
        }

        Ok(ComparisonResult {
            period: *period,
            tickers: unique,
            data: rows.into_values().collect(),
            performance,
        })
    }

    /// Classifies one date, with the configured classifier unless another is named.
    pub fn moon_phase(&self, date: NaiveDate, classifier: Option<ClassifierId>) -> MoonPhase {
        match classifier {
            Some(id) => create_classifier(id).classify(date),
            None => self.classifier.classify(date),
        }
    }
}
