use backtester::{LunarStrategy, create_generator};
use chrono::NaiveDate;
use core_types::{AnnotatedBar, Period, ReportMode, Ticker};
use lunar::{AstronomicalClassifier, annotate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use timeseries::{SyntheticSeriesGenerator, window};

fn annotated_series(seed: u64) -> Vec<AnnotatedBar> {
    let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let ticker = Ticker::parse("MSFT").unwrap();
    let bars = SyntheticSeriesGenerator::new().generate(
        &ticker,
        365,
        today,
        &mut StdRng::seed_from_u64(seed),
    );
    annotate(&AstronomicalClassifier::new(), window(&bars, &Period::SixMonths, today))
}

#[test]
fn simulated_metrics_are_internally_consistent() {
    let mut generator = create_generator(ReportMode::Simulated, None);
    for seed in 0..10 {
        let series = annotated_series(seed);
        let report = generator.generate(&series).unwrap();
        assert_eq!(report.mode, ReportMode::Simulated);

        for (strategy, metrics) in &report.strategies {
            assert!(metrics.max_drawdown <= 0.0, "{strategy:?}");
            assert!(metrics.max_drawdown >= -1.0, "{strategy:?}");
            assert!((0.0..=1.0).contains(&metrics.win_rate), "{strategy:?}");
            assert!(metrics.total_return > -1.0, "{strategy:?}");
        }

        let hold = report.get(LunarStrategy::BuyHold).unwrap();
        let expected = series.last().unwrap().close() / series.first().unwrap().close() - 1.0;
        assert!((hold.total_return - expected).abs() < 1e-9);
        assert_eq!(hold.total_trades, 1);

        // Six months hold about six new moons, so the swing strategy trades.
        let swing = report.get(LunarStrategy::MoonSwing).unwrap();
        assert!(swing.total_trades >= 5);
    }
}

#[test]
fn serialized_report_uses_strategy_names() {
    let mut generator = create_generator(ReportMode::Simulated, None);
    let report = generator.generate(&annotated_series(1)).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["mode"], "simulated");
    for name in ["moonSwing", "inverseMoon", "buyHold"] {
        assert!(json["strategies"][name]["sharpeRatio"].is_number(), "{name}");
        assert!(json["strategies"][name]["totalTrades"].is_u64(), "{name}");
    }
}

#[test]
fn illustrative_mode_is_labelled() {
    let mut generator = create_generator(ReportMode::Illustrative, Some(9));
    assert_eq!(generator.mode(), ReportMode::Illustrative);
    let report = generator.generate(&annotated_series(1)).unwrap();
    assert_eq!(report.mode, ReportMode::Illustrative);
    assert_eq!(report.strategies.len(), 3);
}
