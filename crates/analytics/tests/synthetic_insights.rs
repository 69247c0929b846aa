use analytics::{Correlation, InsightsEngine};
use chrono::NaiveDate;
use core_types::{Period, PhaseName, Ticker};
use lunar::{AstronomicalClassifier, ConwayClassifier, PhaseClassifier, annotate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use timeseries::{SyntheticSeriesGenerator, window};

fn annotated(classifier: &dyn PhaseClassifier, seed: u64) -> Vec<core_types::AnnotatedBar> {
    let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let ticker = Ticker::parse("AAPL").unwrap();
    let bars = SyntheticSeriesGenerator::new().generate(
        &ticker,
        180,
        today,
        &mut StdRng::seed_from_u64(seed),
    );
    annotate(classifier, window(&bars, &Period::ThreeMonths, today))
}

#[test]
fn counts_are_consistent_with_the_series() {
    for seed in 0..10 {
        let series = annotated(&AstronomicalClassifier::new(), seed);
        let report = InsightsEngine::new().calculate(&series).unwrap();

        assert_eq!(report.total_days_analyzed, series.len());
        let breakdown_days: usize = report.phase_returns.values().map(|p| p.days).sum();
        assert_eq!(breakdown_days, series.len());
        assert_eq!(
            report.full_moon_days,
            report.phase_returns.get(&PhaseName::Full).map_or(0, |p| p.days)
        );
        assert_eq!(
            report.full_moon_avg_return,
            report.phase_returns.get(&PhaseName::Full).map_or(0.0, |p| p.avg_return)
        );
        assert!(report.volatility_near_transitions >= 0.0);
    }
}

#[test]
fn astronomical_breakdown_only_uses_four_buckets() {
    let series = annotated(&AstronomicalClassifier::new(), 7);
    let report = InsightsEngine::new().calculate(&series).unwrap();
    // A 91-day window spans three lunar cycles.
    assert_eq!(report.phase_returns.len(), 4);
}

#[test]
fn conway_breakdown_covers_all_eight_phases() {
    let series = annotated(&ConwayClassifier::new(), 7);
    let report = InsightsEngine::new().calculate(&series).unwrap();
    assert_eq!(report.phase_returns.len(), 8);
}

#[test]
fn verdict_matches_the_reported_averages() {
    for seed in 0..10 {
        let report = InsightsEngine::new()
            .calculate(&annotated(&AstronomicalClassifier::new(), seed))
            .unwrap();
        let gap = report.full_moon_avg_return - report.new_moon_avg_return;
        match report.correlation {
            Correlation::None => assert!(gap.abs() < 0.5),
            Correlation::FullMoonHigher => assert!(gap >= 0.5),
            Correlation::NewMoonHigher => assert!(gap <= -0.5),
        }
    }
}
