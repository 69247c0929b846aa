//! # Lunar Strategy Backtester
//!
//! Produces a `StrategyReport` comparing three ways of trading a stock around
//! the lunar cycle: `moonSwing`, `inverseMoon` and `buyHold`.
//!
//! Two generators implement `StrategyReportGenerator`:
//!
//! - `PhaseSimulator` replays the annotated series, long-only, trading at the
//!   close. This is the default.
//! - `IllustrativeGenerator` draws plausible-looking figures from a seedable RNG.
//!   Its reports are labelled `illustrative` and never mixed with simulated ones.

use core_types::{AnnotatedBar, ReportMode};

pub mod error;
pub mod factory;
pub mod illustrative;
pub mod report;
pub mod simulation;
pub mod strategy;

pub use error::BacktestError;
pub use factory::create_generator;
pub use illustrative::IllustrativeGenerator;
pub use report::{StrategyMetrics, StrategyReport};
pub use simulation::PhaseSimulator;
pub use strategy::{Action, LunarStrategy};

/// The contract shared by every strategy report generator.
pub trait StrategyReportGenerator: Send {
    fn mode(&self) -> ReportMode;

    /// Builds a report for `series`, which must be ascending by date.
    fn generate(&mut self, series: &[AnnotatedBar]) -> Result<StrategyReport, BacktestError>;
}

pub(crate) fn ensure_ascending(series: &[AnnotatedBar]) -> Result<(), BacktestError> {
    match series.windows(2).find(|pair| pair[1].date() <= pair[0].date()) {
        Some(pair) => Err(BacktestError::UnorderedSeries(pair[1].date(), pair[0].date())),
        None => Ok(()),
    }
}
