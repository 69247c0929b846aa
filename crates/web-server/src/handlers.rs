use crate::error::{AppError, BACKTEST_FAILED, COMPARE_FAILED, FETCH_FAILED, INSIGHTS_FAILED};
use crate::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use core_types::{ClassifierId, CoreError, MoonPhase, Period, Ticker, parse_date};
use engine::{AnalysisResult, ComparisonResult, InsightsResult, StrategyReportResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl PeriodQuery {
    pub fn resolve(&self) -> Result<Period, CoreError> {
        resolve_period(
            self.period.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareQuery {
    /// Comma-separated, e.g. `AAPL,TSLA`.
    pub tickers: Option<String>,
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MoonPhaseQuery {
    pub classifier: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhaseResponse {
    pub date: NaiveDate,
    pub classifier: ClassifierId,
    pub moon_phase: MoonPhase,
}

/// Blank query values count as absent.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn resolve_period(
    token: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Period, CoreError> {
    let start = present(start).map(|raw| parse_date("startDate", raw)).transpose()?;
    let end = present(end).map(|raw| parse_date("endDate", raw)).transpose()?;
    Period::parse(present(token).unwrap_or(Period::DEFAULT_TOKEN), start, end)
}

/// # GET /api/stock/:ticker
/// The windowed daily series with the moon phase of every bar.
pub async fn get_stock(
    Path(ticker): Path<String>,
    Query(query): Query<PeriodQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<AnalysisResult>, AppError> {
    let ticker = Ticker::parse(&ticker)?;
    let period = query.resolve()?;
    let result = state
        .service
        .annotated_series(&ticker, &period, state.today())
        .await
        .map_err(AppError::engine(FETCH_FAILED))?;
    Ok(Json(result))
}

/// # GET /api/stock/:ticker/insights
pub async fn get_insights(
    Path(ticker): Path<String>,
    Query(query): Query<PeriodQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<InsightsResult>, AppError> {
    let ticker = Ticker::parse(&ticker)?;
    let period = query.resolve()?;
    let result = state
        .service
        .insights(&ticker, &period, state.today())
        .await
        .map_err(AppError::engine(INSIGHTS_FAILED))?;
    Ok(Json(result))
}

/// # GET /api/stock/:ticker/backtest
pub async fn get_backtest(
    Path(ticker): Path<String>,
    Query(query): Query<PeriodQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StrategyReportResult>, AppError> {
    let ticker = Ticker::parse(&ticker)?;
    let period = query.resolve()?;
    let result = state
        .service
        .strategy_report(&ticker, &period, state.today())
        .await
        .map_err(AppError::engine(BACKTEST_FAILED))?;
    Ok(Json(result))
}

/// # GET /api/compare?tickers=AAPL,TSLA
/// Up to five tickers merged by date.
pub async fn get_comparison(
    Query(query): Query<CompareQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ComparisonResult>, AppError> {
    let tickers = present(query.tickers.as_deref())
        .ok_or_else(|| CoreError::invalid_input("tickers", "at least one ticker is required"))?
        .split(',')
        .filter(|raw| !raw.trim().is_empty())
        .map(Ticker::parse)
        .collect::<Result<Vec<_>, _>>()?;
    let period = resolve_period(
        query.period.as_deref(),
        query.start_date.as_deref(),
        query.end_date.as_deref(),
    )?;

    let result = state
        .service
        .compare(&tickers, &period, state.today())
        .await
        .map_err(AppError::engine(COMPARE_FAILED))?;
    Ok(Json(result))
}

/// # GET /api/moon-phase/:date
pub async fn get_moon_phase(
    Path(date): Path<String>,
    Query(query): Query<MoonPhaseQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<MoonPhaseResponse>, AppError> {
    let date = parse_date("date", &date)?;
    let classifier = match present(query.classifier.as_deref()) {
        Some(raw) => raw.parse::<ClassifierId>().map_err(AppError::Validation)?,
        None => state.classifier,
    };

    Ok(Json(MoonPhaseResponse {
        date,
        classifier,
        moon_phase: state.service.moon_phase(date, Some(classifier)),
    }))
}
