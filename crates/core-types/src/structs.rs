use crate::enums::PhaseName;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day's OHLCV record.
///
/// Bars are built once, by the market-data gateway or the synthetic generator,
/// and never mutated afterwards. `DailyBar::new` enforces
/// `low <= {open, close} <= high` with positive, finite prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl DailyBar {
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, CoreError> {
        for (field, value) in [("open", open), ("high", high), ("low", low), ("close", close)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidBar(
                    date,
                    format!("{field} must be a positive finite price, got {value}"),
                ));
            }
        }

        if low > open.min(close) {
            return Err(CoreError::InvalidBar(
                date,
                format!("low {low} is above open/close"),
            ));
        }
        if high < open.max(close) {
            return Err(CoreError::InvalidBar(
                date,
                format!("high {high} is below open/close"),
            ));
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// The moon's illumination and position in its cycle on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhase {
    /// Illuminated fraction of the disc, in `[0, 1]`.
    pub fraction: f64,
    /// Position within the synodic month, in `[0, 1)`. 0 is new moon, 0.5 is full.
    #[serde(rename = "phase")]
    pub phase_angle: f64,
    /// Days since the last new moon.
    pub age_days: f64,
    pub name: PhaseName,
}

/// A bar together with the moon phase of its date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedBar {
    #[serde(flatten)]
    pub bar: DailyBar,
    pub moon_phase: MoonPhase,
}

impl AnnotatedBar {
    pub fn date(&self) -> NaiveDate {
        self.bar.date
    }

    pub fn close(&self) -> f64 {
        self.bar.close
    }

    pub fn phase(&self) -> PhaseName {
        self.moon_phase.name
    }
}

/// A day on which the phase name changed into `full` or `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    pub date: NaiveDate,
    pub phase: PhaseName,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn accepts_bar_within_high_low_range() {
        let bar = DailyBar::new(date(2024, 1, 2), 10.0, 12.0, 9.5, 11.0, 1_000).unwrap();
        assert_eq!(bar.close, 11.0);
    }

    #[test]
    fn rejects_low_above_open() {
        let err = DailyBar::new(date(2024, 1, 2), 10.0, 12.0, 10.5, 11.0, 1_000).unwrap_err();
        assert!(matches!(err, CoreError::InvalidBar(_, _)));
    }

    #[test]
    fn rejects_high_below_close() {
        assert!(DailyBar::new(date(2024, 1, 2), 10.0, 10.5, 9.0, 11.0, 1_000).is_err());
    }

    #[test]
    fn rejects_non_positive_and_nan_prices() {
        assert!(DailyBar::new(date(2024, 1, 2), 0.0, 1.0, 0.0, 1.0, 1).is_err());
        assert!(DailyBar::new(date(2024, 1, 2), f64::NAN, 1.0, 0.5, 1.0, 1).is_err());
    }

    #[test]
    fn annotated_bar_serializes_flat_with_moon_phase() {
        let bar = AnnotatedBar {
            bar: DailyBar::new(date(2024, 1, 2), 10.0, 12.0, 9.5, 11.0, 1_000).unwrap(),
            moon_phase: MoonPhase {
                fraction: 0.5,
                phase_angle: 0.25,
                age_days: 7.38,
                name: PhaseName::WaxingCrescent,
            },
        };
        let json = serde_json::to_value(&bar).unwrap();
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["close"], 11.0);
        assert_eq!(json["volume"], 1_000);
        assert_eq!(json["moonPhase"]["phase"], 0.25);
        assert_eq!(json["moonPhase"]["name"], "waxing-crescent");
    }
}
