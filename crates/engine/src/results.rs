use analytics::Insights;
use backtester::{LunarStrategy, StrategyMetrics};
use chrono::NaiveDate;
use core_types::{AnnotatedBar, DataSource, MoonPhase, Period, PhaseTransition, ReportMode, Ticker};
use serde::Serialize;
use std::collections::BTreeMap;

/// A windowed, phase-annotated price series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub ticker: Ticker,
    pub period: Period,
    pub data: Vec<AnnotatedBar>,
    /// True when the bars are synthetic.
    pub mock_data: bool,
    pub source: DataSource,
    pub classifier: String,
    pub transitions: Vec<PhaseTransition>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResult {
    pub ticker: Ticker,
    pub period: Period,
    pub insights: Insights,
    pub mock_data: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReportResult {
    pub ticker: Ticker,
    pub period: Period,
    pub mode: ReportMode,
    pub strategies: BTreeMap<LunarStrategy, StrategyMetrics>,
    pub mock_data: bool,
}

/// Several tickers merged by date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub period: Period,
    pub tickers: Vec<Ticker>,
    pub data: Vec<ComparisonRow>,
    pub performance: Vec<TickerPerformance>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub date: NaiveDate,
    /// Close per ticker. Tickers without a bar on this date are absent.
    pub closes: BTreeMap<Ticker, f64>,
    pub moon_phase: MoonPhase,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerPerformance {
    pub ticker: Ticker,
    /// First to last close, in percent.
    pub total_return_pct: f64,
    pub mock_data: bool,
}
