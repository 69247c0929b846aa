use crate::error::ConfigError;
use core_types::{ClassifierId, ReportMode};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// The credential value that means "no real market data".
pub const DEMO_API_KEY: &str = "demo";

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty file (or no file at all) is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub market_data: MarketDataConfig,
    pub synthetic: SyntheticConfig,
    pub analysis: AnalysisConfig,
    pub backtest: BacktestConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Rejects values that would make the service misbehave rather than fail fast.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be non-zero".to_string(),
            ));
        }
        if self.market_data.timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "market_data.timeout must be greater than zero".to_string(),
            ));
        }
        if self.synthetic.max_days == 0 {
            return Err(ConfigError::ValidationError(
                "synthetic.max_days must be at least 1".to_string(),
            ));
        }
        if self.market_data.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "market_data.base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// Settings for the external daily time-series API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    /// Alpha Vantage API key. Absent or `"demo"` means synthetic data only.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Upper bound on a single upstream request, e.g. `"10s"`.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl MarketDataConfig {
    /// The usable credential, if real market data is enabled.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !key.eq_ignore_ascii_case(DEMO_API_KEY))
    }

    pub fn is_live(&self) -> bool {
        self.credential().is_some()
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://www.alphavantage.co/query".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Settings for the fallback random-walk series.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    /// Upper bound on generated days per request.
    pub max_days: u64,
    /// Fixed seed for reproducible series. Unset means a fresh series per request.
    pub seed: Option<u64>,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            max_days: 100,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub classifier: ClassifierId,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub mode: ReportMode,
    /// Seed for the illustrative report generator.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            directory: None,
        }
    }
}
