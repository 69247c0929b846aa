//! # Lunar Markets Insights Engine
//!
//! This crate measures how a stock behaved around the phases of the moon.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `InsightsEngine` is a stateless calculator. It takes a
//!   windowed, phase-annotated series as input and produces an `Insights` report as output.
//!
//! ## Public API
//!
//! - `InsightsEngine`: The main struct that contains the calculation logic.
//! - `Insights`: The report of phase returns, volatility and the derived verdicts.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

pub mod engine;
pub mod error;
pub mod report;

pub use engine::InsightsEngine;
pub use error::AnalyticsError;
pub use report::{Correlation, Insights, PhaseReturn, VolatilityLevel};
