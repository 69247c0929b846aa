use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::CoreError;
use engine::error::EngineError;
use serde_json::json;
use thiserror::Error;

pub const FETCH_FAILED: &str = "Failed to fetch stock data";
pub const INSIGHTS_FAILED: &str = "Failed to calculate insights";
pub const BACKTEST_FAILED: &str = "Failed to run backtest";
pub const COMPARE_FAILED: &str = "Failed to compare stocks";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{message}: {source}")]
    Internal {
        message: &'static str,
        source: EngineError,
    },
}

impl AppError {
    /// Maps an engine failure, keeping validation problems as client errors and
    /// hiding everything else behind `message`.
    pub fn engine(message: &'static str) -> impl FnOnce(EngineError) -> AppError {
        move |source| match source {
            EngineError::Validation(e) => AppError::Validation(e.to_string()),
            source => AppError::Internal { message, source },
        }
    }
}

impl From<CoreError> for AppError {
    fn from(error: CoreError) -> Self {
        AppError::Validation(error.to_string())
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(message) => {
                tracing::debug!(%message, "Rejected request.");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Internal { message, source } => {
                tracing::error!(error = ?source, "{message}.");
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
