use crate::error::ApiError;
use chrono::NaiveDate;
use core_types::DailyBar;
use serde::Deserialize;
use std::collections::BTreeMap;

// Alpha Vantage signals failure inside a 200 response, through one of the
// optional top-level keys below.

/// The body of a `TIME_SERIES_DAILY` request.
#[derive(Debug, Clone, Deserialize)]
pub struct DailySeriesResponse {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
    #[serde(rename = "Time Series (Daily)")]
    pub time_series: Option<BTreeMap<String, RawDailyBar>>,
}

/// One day of the series. Every field arrives as a string.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}

impl DailySeriesResponse {
    /// Converts the payload into bars, oldest first.
    ///
    /// Upstream error markers become typed errors. Rows whose numbers do not
    /// parse fail the whole response; rows that parse but break the OHLC
    /// ordering are skipped with a warning.
    pub fn into_bars(self, symbol: &str) -> Result<Vec<DailyBar>, ApiError> {
        if let Some(message) = self.error_message {
            return Err(ApiError::InvalidSymbol(symbol.to_string(), message));
        }
        if let Some(message) = self.note.or(self.information) {
            return Err(ApiError::RateLimited(message));
        }
        let series = self
            .time_series
            .ok_or_else(|| ApiError::NoData(symbol.to_string()))?;

        let mut bars = Vec::with_capacity(series.len());
        for (date, raw) in series {
            let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| ApiError::Deserialization(format!("Invalid date '{date}': {e}")))?;

            match DailyBar::new(
                date,
                parse_price(&raw.open, "open")?,
                parse_price(&raw.high, "high")?,
                parse_price(&raw.low, "low")?,
                parse_price(&raw.close, "close")?,
                parse_volume(&raw.volume)?,
            ) {
                Ok(bar) => bars.push(bar),
                Err(e) => tracing::warn!(symbol, error = %e, "Skipping malformed upstream bar."),
            }
        }

        // Keys are ISO dates, so the map is already chronological.
        Ok(bars)
    }
}

fn parse_price(raw: &str, field: &str) -> Result<f64, ApiError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| ApiError::Deserialization(format!("Invalid {field} '{raw}': {e}")))
}

fn parse_volume(raw: &str) -> Result<u64, ApiError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| ApiError::Deserialization(format!("Invalid volume '{raw}': {e}")))
}
