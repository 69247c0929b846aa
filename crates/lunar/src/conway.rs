use crate::PhaseClassifier;
use chrono::{Datelike, NaiveDate};
use core_types::{MoonPhase, PhaseName};
use std::f64::consts::PI;

const EIGHT_BUCKETS: [PhaseName; 8] = [
    PhaseName::New,
    PhaseName::WaxingCrescent,
    PhaseName::FirstQuarter,
    PhaseName::WaxingGibbous,
    PhaseName::Full,
    PhaseName::WaningGibbous,
    PhaseName::LastQuarter,
    PhaseName::WaningCrescent,
];

/// John Conway's mental-arithmetic moon age, bucketed into eight phases.
///
/// Works on a 30-day "moon month", so the age is an integer in `0..30`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConwayClassifier;

impl ConwayClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Age of the moon in days (0 = new, 15 = full).
    pub fn moon_age(date: NaiveDate) -> u32 {
        let year = date.year();
        let month = date.month() as i32;
        let day = date.day() as i32;

        let mut r = (year % 100) % 19;
        if r > 9 {
            r -= 19;
        }
        r = ((r * 11) % 30) + month + day;
        if month < 3 {
            r += 2;
        }
        // The published rule subtracts 4 (20th century) or 8.3 (21st) and
        // rounds; for an integer r that is exactly 4 or 8.
        r -= if year < 2000 { 4 } else { 8 };

        r.rem_euclid(30) as u32
    }

    /// Evenly spaced eighths of the 30-day cycle, centred on each named phase.
    pub fn bucket(age: u32) -> PhaseName {
        EIGHT_BUCKETS[(((age * 8 + 15) / 30) % 8) as usize]
    }
}

impl PhaseClassifier for ConwayClassifier {
    fn name(&self) -> &'static str {
        "conway"
    }

    fn classify(&self, date: NaiveDate) -> MoonPhase {
        let age = Self::moon_age(date);
        let phase_angle = f64::from(age) / 30.0;
        MoonPhase {
            fraction: ((1.0 - (2.0 * PI * phase_angle).cos()) / 2.0).clamp(0.0, 1.0),
            phase_angle,
            age_days: f64::from(age),
            name: Self::bucket(age),
        }
    }
}
