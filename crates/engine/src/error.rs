use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] core_types::CoreError),

    #[error("API client error: {0}")]
    ApiClient(#[from] api_client::error::ApiError),

    #[error("Insights calculation error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Strategy report error: {0}")]
    Backtest(#[from] backtester::BacktestError),
}

impl EngineError {
    /// True when the caller sent something unusable, as opposed to a failure
    /// on our side.
    pub fn is_validation(&self) -> bool {
        matches!(self, EngineError::Validation(_))
    }
}
