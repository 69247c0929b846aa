use crate::error::AnalyticsError;
use crate::report::{Correlation, Insights, PhaseReturn, VolatilityLevel};
use core_types::{AnnotatedBar, PhaseName};
use std::collections::BTreeMap;

/// A stateless calculator deriving lunar insights from an annotated series.
#[derive(Debug, Default)]
pub struct InsightsEngine {}

impl InsightsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating insights.
    ///
    /// `series` must be the windowed series, strictly ascending by date. An
    /// empty series yields the zeroed report.
    pub fn calculate(&self, series: &[AnnotatedBar]) -> Result<Insights, AnalyticsError> {
        if let Some(pair) = series.windows(2).find(|pair| pair[1].date() <= pair[0].date()) {
            return Err(AnalyticsError::UnorderedSeries(pair[1].date(), pair[0].date()));
        }

        let mut report = Insights::new();
        if series.is_empty() {
            return Ok(report);
        }

        report.total_days_analyzed = series.len();
        report.full_moon_days = count_phase(series, PhaseName::Full);
        report.new_moon_days = count_phase(series, PhaseName::New);
        report.full_moon_avg_return = average_phase_return(series, PhaseName::Full);
        report.new_moon_avg_return = average_phase_return(series, PhaseName::New);
        report.volatility_near_transitions = volatility(series);

        let mut phases: Vec<PhaseName> = series.iter().map(AnnotatedBar::phase).collect();
        phases.sort();
        phases.dedup();
        report.phase_returns = phases
            .into_iter()
            .map(|phase| {
                let stats = PhaseReturn {
                    days: count_phase(series, phase),
                    avg_return: average_phase_return(series, phase),
                };
                (phase, stats)
            })
            .collect::<BTreeMap<_, _>>();

        report.correlation =
            Correlation::from_returns(report.full_moon_avg_return, report.new_moon_avg_return);
        report.volatility_level =
            VolatilityLevel::from_volatility(report.volatility_near_transitions);

        tracing::debug!(
            days = report.total_days_analyzed,
            full_moon_days = report.full_moon_days,
            new_moon_days = report.new_moon_days,
            "Calculated lunar insights."
        );
        Ok(report)
    }
}

fn count_phase(series: &[AnnotatedBar], phase: PhaseName) -> usize {
    series.iter().filter(|bar| bar.phase() == phase).count()
}

/// Average day-over-day return, in percent, of the days tagged `phase`.
///
/// Each member is compared against the bar just before it in the whole series,
/// not within the subset. Subsets of fewer than two days report zero, as do
/// subsets where no member has an earlier bar.
fn average_phase_return(series: &[AnnotatedBar], phase: PhaseName) -> f64 {
    if count_phase(series, phase) < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = series
        .windows(2)
        .filter(|pair| pair[1].phase() == phase)
        .map(|pair| (pair[1].close() - pair[0].close()) / pair[0].close())
        .collect();

    if returns.is_empty() {
        return 0.0;
    }
    returns.iter().sum::<f64>() / returns.len() as f64 * 100.0
}

/// Mean absolute day-over-day change, in percent, over all consecutive pairs.
fn volatility(series: &[AnnotatedBar]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let total: f64 = series
        .windows(2)
        .map(|pair| ((pair[1].close() - pair[0].close()) / pair[0].close()).abs())
        .sum();
    total / (series.len() - 1) as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{DailyBar, MoonPhase};

    fn bar(day: u32, close: f64, name: PhaseName) -> AnnotatedBar {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        AnnotatedBar {
            bar: DailyBar::new(date, close, close, close, close, 1_000_000).unwrap(),
            moon_phase: MoonPhase {
                fraction: 0.5,
                phase_angle: 0.5,
                age_days: 14.0,
                name,
            },
        }
    }

    fn close_to(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_series_gives_zeroed_report() {
        let report = InsightsEngine::new().calculate(&[]).unwrap();
        assert_eq!(report, Insights::default());
    }

    #[test]
    fn hand_computed_series() {
        let series = vec![
            bar(1, 100.0, PhaseName::New),
            bar(2, 110.0, PhaseName::New),
            bar(3, 99.0, PhaseName::Full),
            bar(4, 108.9, PhaseName::Full),
        ];
        let report = InsightsEngine::new().calculate(&series).unwrap();

        assert_eq!(report.total_days_analyzed, 4);
        assert_eq!(report.full_moon_days, 2);
        assert_eq!(report.new_moon_days, 2);
        // Only the second new-moon day has an earlier bar.
        assert!(close_to(report.new_moon_avg_return, 10.0));
        assert!(close_to(report.full_moon_avg_return, 0.0));
        assert!(close_to(report.volatility_near_transitions, 10.0));
        assert_eq!(report.correlation, Correlation::NewMoonHigher);
        assert_eq!(report.volatility_level, VolatilityLevel::High);
        assert_eq!(report.phase_returns.len(), 2);
        assert_eq!(report.phase_returns[&PhaseName::Full].days, 2);
    }

    #[test]
    fn previous_price_comes_from_the_whole_series() {
        let series = vec![
            bar(1, 100.0, PhaseName::New),
            bar(2, 200.0, PhaseName::WaxingCrescent),
            bar(3, 210.0, PhaseName::Full),
            bar(4, 105.0, PhaseName::WaningCrescent),
            bar(5, 115.5, PhaseName::Full),
        ];
        let report = InsightsEngine::new().calculate(&series).unwrap();
        // (+5% and +10%) / 2
        assert!(close_to(report.full_moon_avg_return, 7.5));
    }

    #[test]
    fn single_member_subset_reports_zero() {
        let series = vec![
            bar(1, 100.0, PhaseName::WaxingCrescent),
            bar(2, 150.0, PhaseName::Full),
            bar(3, 150.0, PhaseName::WaningCrescent),
        ];
        let report = InsightsEngine::new().calculate(&series).unwrap();
        assert_eq!(report.full_moon_days, 1);
        assert_eq!(report.full_moon_avg_return, 0.0);
        assert_eq!(report.phase_returns[&PhaseName::Full].avg_return, 0.0);
    }

    #[test]
    fn single_bar_has_no_volatility() {
        let report = InsightsEngine::new()
            .calculate(&[bar(1, 100.0, PhaseName::Full)])
            .unwrap();
        assert_eq!(report.total_days_analyzed, 1);
        assert_eq!(report.volatility_near_transitions, 0.0);
    }

    #[test]
    fn rejects_unordered_series() {
        let series = vec![bar(2, 100.0, PhaseName::New), bar(1, 100.0, PhaseName::New)];
        assert!(matches!(
            InsightsEngine::new().calculate(&series),
            Err(AnalyticsError::UnorderedSeries(..))
        ));
    }
}
