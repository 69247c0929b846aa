//! # Time Series Utilities
//!
//! Pure functions over daily bar series:
//!
//! - `window`: clips a series to a `Period`, sorted ascending with unique dates.
//! - `SyntheticSeriesGenerator`: a plausible OHLCV random walk used whenever real
//!   market data is unavailable, and as a test fixture.

pub mod synthetic;
pub mod window;

pub use synthetic::{SyntheticSeriesGenerator, ticker_seed};
pub use window::window;
