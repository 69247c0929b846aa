use crate::{PhaseClassifier, SYNODIC_MONTH_DAYS};
use chrono::{Datelike, NaiveDate};
use core_types::{MoonPhase, PhaseName};
use std::f64::consts::PI;

const RAD: f64 = PI / 180.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;
/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;
/// Obliquity of the ecliptic.
const OBLIQUITY: f64 = RAD * 23.4397;
const SUN_DISTANCE_KM: f64 = 149_598_000.0;

/// Moon phase from a low-precision solar and lunar ephemeris, evaluated at
/// 00:00 UTC of the requested date.
#[derive(Debug, Default, Clone, Copy)]
pub struct AstronomicalClassifier;

impl AstronomicalClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Maps a phase angle to one of the four coarse buckets.
    pub fn bucket(phase_angle: f64) -> PhaseName {
        if phase_angle < 0.125 {
            PhaseName::New
        } else if phase_angle < 0.375 {
            PhaseName::WaxingCrescent
        } else if phase_angle < 0.625 {
            PhaseName::Full
        } else if phase_angle < 0.875 {
            PhaseName::WaningCrescent
        } else {
            PhaseName::New
        }
    }
}

impl PhaseClassifier for AstronomicalClassifier {
    fn name(&self) -> &'static str {
        "astronomical"
    }

    fn classify(&self, date: NaiveDate) -> MoonPhase {
        let (fraction, phase_angle) = illumination(days_since_j2000(date));
        MoonPhase {
            fraction,
            phase_angle,
            age_days: phase_angle * SYNODIC_MONTH_DAYS,
            name: Self::bucket(phase_angle),
        }
    }
}

fn days_since_j2000(date: NaiveDate) -> f64 {
    let unix_days = (i64::from(date.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE) as f64;
    unix_days - 0.5 + J1970 - J2000
}

struct Equatorial {
    right_ascension: f64,
    declination: f64,
}

fn equatorial(longitude: f64, latitude: f64) -> Equatorial {
    Equatorial {
        right_ascension: (longitude.sin() * OBLIQUITY.cos() - latitude.tan() * OBLIQUITY.sin())
            .atan2(longitude.cos()),
        declination: (latitude.sin() * OBLIQUITY.cos()
            + latitude.cos() * OBLIQUITY.sin() * longitude.sin())
        .asin(),
    }
}

fn sun_coords(d: f64) -> Equatorial {
    let mean_anomaly = RAD * (357.5291 + 0.985_600_28 * d);
    let center = RAD
        * (1.9148 * mean_anomaly.sin()
            + 0.02 * (2.0 * mean_anomaly).sin()
            + 0.0003 * (3.0 * mean_anomaly).sin());
    let perihelion = RAD * 102.9372;
    let ecliptic_longitude = mean_anomaly + center + perihelion + PI;
    equatorial(ecliptic_longitude, 0.0)
}

/// Geocentric lunar coordinates plus distance in km.
fn moon_coords(d: f64) -> (Equatorial, f64) {
    let mean_longitude = RAD * (218.316 + 13.176_396 * d);
    let mean_anomaly = RAD * (134.963 + 13.064_993 * d);
    let mean_distance = RAD * (93.272 + 13.229_350 * d);

    let longitude = mean_longitude + RAD * 6.289 * mean_anomaly.sin();
    let latitude = RAD * 5.128 * mean_distance.sin();
    let distance_km = 385_001.0 - 20_905.0 * mean_anomaly.cos();

    (equatorial(longitude, latitude), distance_km)
}

/// Returns `(illuminated fraction, phase angle)`.
fn illumination(d: f64) -> (f64, f64) {
    let sun = sun_coords(d);
    let (moon, moon_distance) = moon_coords(d);
    let delta_ra = sun.right_ascension - moon.right_ascension;

    let elongation = (sun.declination.sin() * moon.declination.sin()
        + sun.declination.cos() * moon.declination.cos() * delta_ra.cos())
    .clamp(-1.0, 1.0)
    .acos();
    let incidence = (SUN_DISTANCE_KM * elongation.sin())
        .atan2(moon_distance - SUN_DISTANCE_KM * elongation.cos());
    let angle = (sun.declination.cos() * delta_ra.sin()).atan2(
        sun.declination.sin() * moon.declination.cos()
            - sun.declination.cos() * moon.declination.sin() * delta_ra.cos(),
    );

    let fraction = ((1.0 + incidence.cos()) / 2.0).clamp(0.0, 1.0);
    let sign = if angle < 0.0 { -1.0 } else { 1.0 };
    let phase = 0.5 + 0.5 * incidence * sign / PI;

    // incidence can reach exactly PI, which would put the angle at 1.0.
    (fraction, phase.rem_euclid(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_offset_matches_julian_dates() {
        // 2000-01-01T00:00Z is JD 2451544.5.
        assert!((days_since_j2000(date(2000, 1, 1)) + 0.5).abs() < 1e-9);
    }

    #[test]
    fn full_moon_of_january_2024() {
        // Full moon at 2024-01-25 17:54 UTC.
        let phase = AstronomicalClassifier.classify(date(2024, 1, 25));
        assert_eq!(phase.name, PhaseName::Full);
        assert!(phase.fraction > 0.95, "fraction was {}", phase.fraction);
        assert!((phase.phase_angle - 0.5).abs() < 0.05);
    }

    #[test]
    fn new_moon_of_january_2024() {
        // New moon at 2024-01-11 11:57 UTC.
        let phase = AstronomicalClassifier.classify(date(2024, 1, 11));
        assert_eq!(phase.name, PhaseName::New);
        assert!(phase.fraction < 0.05, "fraction was {}", phase.fraction);
    }

    #[test]
    fn first_quarter_is_still_waxing_crescent() {
        // First quarter 2024-01-18 03:52 UTC; angle ~0.24 at midnight.
        let phase = AstronomicalClassifier.classify(date(2024, 1, 18));
        assert_eq!(phase.name, PhaseName::WaxingCrescent);
        assert!((phase.fraction - 0.5).abs() < 0.1);
    }

    #[test]
    fn bucket_thresholds() {
        assert_eq!(AstronomicalClassifier::bucket(0.0), PhaseName::New);
        assert_eq!(AstronomicalClassifier::bucket(0.125), PhaseName::WaxingCrescent);
        assert_eq!(AstronomicalClassifier::bucket(0.375), PhaseName::Full);
        assert_eq!(AstronomicalClassifier::bucket(0.625), PhaseName::WaningCrescent);
        assert_eq!(AstronomicalClassifier::bucket(0.875), PhaseName::New);
        assert_eq!(AstronomicalClassifier::bucket(0.9999), PhaseName::New);
    }

    #[test]
    fn age_tracks_phase_angle() {
        let phase = AstronomicalClassifier.classify(date(2024, 1, 25));
        assert!((phase.age_days - phase.phase_angle * SYNODIC_MONTH_DAYS).abs() < 1e-12);
    }
}
