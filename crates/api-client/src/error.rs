use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("The API rejected symbol '{0}': {1}")]
    InvalidSymbol(String, String),

    #[error("The API rate limit was hit: {0}")]
    RateLimited(String),

    #[error("The API returned no daily time series for '{0}'")]
    NoData(String),

    #[error("The API request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to send the HTTP request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The API request returned status {0}")]
    Status(u16),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// A short, stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidSymbol(..) => "invalid-symbol",
            ApiError::RateLimited(_) => "rate-limited",
            ApiError::NoData(_) => "no-data",
            ApiError::Timeout(_) => "timeout",
            ApiError::Transport(_) => "transport",
            ApiError::Status(_) => "status",
            ApiError::Deserialization(_) => "deserialization",
        }
    }
}
