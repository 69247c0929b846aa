//! # Lunar Phase Classification
//!
//! Turns a calendar date into a `MoonPhase`. Two classifiers implement the
//! `PhaseClassifier` trait:
//!
//! - `AstronomicalClassifier`: a low-precision solar/lunar ephemeris. This is the
//!   classifier every analysis path uses unless configured otherwise. It names
//!   only four buckets, and the bucket called `full` spans first quarter through
//!   last quarter.
//! - `ConwayClassifier`: Conway's integer moon-age rule with eight buckets. It
//!   needs no ephemeris and drifts by up to a day or so from the astronomical one.
//!
//! Both are pure and total over every representable date.

pub mod astronomical;
pub mod conway;
pub mod factory;

pub use astronomical::AstronomicalClassifier;
pub use conway::ConwayClassifier;
pub use factory::create_classifier;

use chrono::NaiveDate;
use core_types::{AnnotatedBar, DailyBar, MoonPhase, PhaseName, PhaseTransition};

/// Mean length of the synodic month in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588;

/// The contract every moon-phase classifier fulfils.
///
/// Implementations must return `fraction` in `[0, 1]` and `phase_angle` in `[0, 1)`.
pub trait PhaseClassifier: Send + Sync {
    /// A short, stable identifier (e.g. `"astronomical"`).
    fn name(&self) -> &'static str;

    fn classify(&self, date: NaiveDate) -> MoonPhase;
}

/// Attaches the moon phase of each bar's date, preserving order.
pub fn annotate(classifier: &dyn PhaseClassifier, bars: Vec<DailyBar>) -> Vec<AnnotatedBar> {
    bars.into_iter()
        .map(|bar| {
            let moon_phase = classifier.classify(bar.date);
            AnnotatedBar { bar, moon_phase }
        })
        .collect()
}

/// Dates on which the phase name switches into `full` or `new`.
///
/// The first bar is never a transition because there is nothing to compare it with.
pub fn transitions(series: &[AnnotatedBar]) -> Vec<PhaseTransition> {
    series
        .windows(2)
        .filter(|w| w[0].phase() != w[1].phase())
        .filter(|w| matches!(w[1].phase(), PhaseName::Full | PhaseName::New))
        .map(|w| PhaseTransition {
            date: w[1].date(),
            phase: w[1].phase(),
        })
        .collect()
}
