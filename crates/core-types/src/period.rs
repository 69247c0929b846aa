use crate::error::CoreError;
use chrono::{Days, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// The date window a request asks for.
///
/// Fixed periods are relative to "today", which callers always pass in
/// explicitly. `Custom` carries its own inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    FiveYears,
    Custom { start: NaiveDate, end: NaiveDate },
}

impl Period {
    pub const DEFAULT_TOKEN: &'static str = "1M";

    /// Builds a period from its token and the optional custom bounds.
    ///
    /// `CUSTOM` requires both bounds and `start <= end`. The bounds are ignored
    /// for every other token.
    pub fn parse(
        token: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, CoreError> {
        match token.trim().to_ascii_uppercase().as_str() {
            "1M" => Ok(Period::OneMonth),
            "3M" => Ok(Period::ThreeMonths),
            "6M" => Ok(Period::SixMonths),
            "1Y" => Ok(Period::OneYear),
            "5Y" => Ok(Period::FiveYears),
            "CUSTOM" => {
                let start = start.ok_or_else(|| {
                    CoreError::invalid_input("startDate", "required when period is CUSTOM")
                })?;
                let end = end.ok_or_else(|| {
                    CoreError::invalid_input("endDate", "required when period is CUSTOM")
                })?;
                if start > end {
                    return Err(CoreError::invalid_input(
                        "startDate",
                        format!("{start} is after endDate {end}"),
                    ));
                }
                Ok(Period::Custom { start, end })
            }
            other => Err(CoreError::invalid_input(
                "period",
                format!("unknown period '{other}', expected one of 1M, 3M, 6M, 1Y, 5Y, CUSTOM"),
            )),
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Period::OneMonth => "1M",
            Period::ThreeMonths => "3M",
            Period::SixMonths => "6M",
            Period::OneYear => "1Y",
            Period::FiveYears => "5Y",
            Period::Custom { .. } => "CUSTOM",
        }
    }

    /// The look-back length of a fixed period. `None` for `Custom`.
    pub fn lookback_days(&self) -> Option<u64> {
        match self {
            Period::OneMonth => Some(30),
            Period::ThreeMonths => Some(90),
            Period::SixMonths => Some(180),
            Period::OneYear => Some(365),
            Period::FiveYears => Some(1825),
            Period::Custom { .. } => None,
        }
    }

    /// Inclusive `(cutoff, end)` bounds of the window.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match (self, self.lookback_days()) {
            (Period::Custom { start, end }, _) => (*start, *end),
            (_, Some(days)) => (
                today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN),
                today,
            ),
            (_, None) => (today, today),
        }
    }

    /// The number of calendar days a generated series should cover, and the
    /// date it should end on. Never ends after `today`; a custom window lying
    /// wholly in the future covers zero days.
    pub fn series_span(&self, today: NaiveDate) -> (u64, NaiveDate) {
        match self {
            Period::Custom { start, end } => {
                let end = (*end).min(today);
                if *start > end {
                    return (0, end);
                }
                ((end - *start).num_days() as u64 + 1, end)
            }
            _ => (self.lookback_days().unwrap_or(30), today),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

/// Parses a `YYYY-MM-DD` date coming from a query string or CLI flag.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        CoreError::invalid_input(field, format!("'{raw}' is not a YYYY-MM-DD date ({e})"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_fixed_tokens() {
        assert_eq!(Period::parse("1M", None, None).unwrap(), Period::OneMonth);
        assert_eq!(Period::parse("5y", None, None).unwrap(), Period::FiveYears);
        assert_eq!(Period::OneYear.lookback_days(), Some(365));
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = Period::parse("2W", None, None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "period"));
    }

    #[test]
    fn custom_requires_both_bounds() {
        let err = Period::parse("CUSTOM", Some(date(2024, 1, 1)), None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "endDate"));
        assert!(Period::parse("CUSTOM", None, Some(date(2024, 1, 1))).is_err());
    }

    #[test]
    fn custom_rejects_inverted_bounds() {
        assert!(Period::parse("CUSTOM", Some(date(2024, 2, 1)), Some(date(2024, 1, 1))).is_err());
    }

    #[test]
    fn fixed_bounds_are_relative_to_today() {
        let today = date(2024, 3, 31);
        assert_eq!(Period::OneMonth.bounds(today), (date(2024, 3, 1), today));
    }

    #[test]
    fn custom_series_span_is_inclusive() {
        let period = Period::Custom {
            start: date(2024, 1, 1),
            end: date(2024, 1, 10),
        };
        assert_eq!(period.series_span(date(2030, 1, 1)), (10, date(2024, 1, 10)));
    }

    #[test]
    fn custom_series_span_stops_at_today() {
        let straddling = Period::Custom {
            start: date(2024, 6, 25),
            end: date(2024, 7, 10),
        };
        assert_eq!(straddling.series_span(date(2024, 6, 30)), (6, date(2024, 6, 30)));

        let future = Period::Custom {
            start: date(2030, 1, 1),
            end: date(2030, 1, 10),
        };
        assert_eq!(future.series_span(date(2024, 6, 30)).0, 0);
    }

    #[test]
    fn serializes_as_token() {
        let json = serde_json::to_string(&Period::SixMonths).unwrap();
        assert_eq!(json, "\"6M\"");
    }

    #[test]
    fn parse_date_reports_field() {
        assert_eq!(parse_date("startDate", "2024-01-05").unwrap(), date(2024, 1, 5));
        let err = parse_date("startDate", "01/05/2024").unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(field, _) if field == "startDate"));
    }
}
