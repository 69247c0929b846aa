use crate::error::ConfigError;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    AnalysisConfig, BacktestConfig, Config, DEMO_API_KEY, LoggingConfig, MarketDataConfig,
    ServerConfig, SyntheticConfig,
};

/// File read when no explicit path is given. It is optional.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
/// Prefix for environment overrides, e.g. `LUNAR__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "LUNAR";
/// The credential variable the dashboard has always read.
pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

/// Command-line handle for choosing the configuration file.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ConfigArgs {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[cfg_attr(feature = "clap", arg(long, global = true))]
    pub config: Option<PathBuf>,
}

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file
/// (required only when `path` is given explicitly), then `LUNAR__*`
/// environment variables. If no API key was configured, `ALPHA_VANTAGE_API_KEY`
/// is used. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    let builder = config::Config::builder()
        .add_source(config::File::from(file).required(path.is_some()))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config = builder.try_deserialize::<Config>()?;

    if config.market_data.api_key.is_none() {
        config.market_data.api_key = std::env::var(API_KEY_ENV).ok();
    }

    config.validate()?;
    tracing::debug!(live = config.market_data.is_live(), "Configuration loaded.");
    Ok(config)
}

/// Parses configuration from TOML text alone, without touching the
/// environment. Used by tests and tooling.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
