use crate::error::BacktestError;
use crate::report::{StrategyMetrics, StrategyReport};
use crate::strategy::LunarStrategy;
use crate::{StrategyReportGenerator, ensure_ascending};
use core_types::{AnnotatedBar, ReportMode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws plausible-looking strategy figures without looking at prices.
///
/// `moonSwing` leans on a shared slightly positive base return, `inverseMoon`
/// mirrors half of it and `buyHold` keeps 70% of it.
pub struct IllustrativeGenerator {
    rng: StdRng,
}

impl IllustrativeGenerator {
    /// A fixed `seed` makes the reports reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }

    fn trades(&mut self) -> u32 {
        (self.unit() * 20.0 + 10.0).floor() as u32
    }

    fn moon_swing(&mut self, base: f64) -> StrategyMetrics {
        StrategyMetrics {
            total_return: base + (self.unit() - 0.5) * 0.2,
            annualized_return: (base + (self.unit() - 0.5) * 0.2) * 0.8,
            max_drawdown: -(self.unit() * 0.15 + 0.05),
            win_rate: self.unit() * 0.4 + 0.4,
            total_trades: self.trades(),
            sharpe_ratio: (self.unit() - 0.3) * 2.0,
        }
    }

    fn inverse_moon(&mut self, base: f64) -> StrategyMetrics {
        StrategyMetrics {
            total_return: base * -0.5 + (self.unit() - 0.5) * 0.15,
            annualized_return: (base * -0.5 + (self.unit() - 0.5) * 0.15) * 0.8,
            max_drawdown: -(self.unit() * 0.2 + 0.08),
            win_rate: self.unit() * 0.3 + 0.3,
            total_trades: self.trades(),
            sharpe_ratio: (self.unit() - 0.6) * 1.5,
        }
    }

    fn buy_hold(&mut self, base: f64) -> StrategyMetrics {
        StrategyMetrics {
            total_return: base * 0.7,
            annualized_return: base * 0.7 * 0.9,
            max_drawdown: -(self.unit() * 0.25 + 0.1),
            win_rate: 1.0,
            total_trades: 1,
            sharpe_ratio: self.unit() * 1.5 + 0.3,
        }
    }
}

impl StrategyReportGenerator for IllustrativeGenerator {
    fn mode(&self) -> ReportMode {
        ReportMode::Illustrative
    }

    fn generate(&mut self, series: &[AnnotatedBar]) -> Result<StrategyReport, BacktestError> {
        ensure_ascending(series)?;

        let base = (self.unit() - 0.4) * 0.3;
        let mut report = StrategyReport::new(self.mode());
        let moon_swing = self.moon_swing(base);
        let inverse_moon = self.inverse_moon(base);
        let buy_hold = self.buy_hold(base);
        report.strategies.insert(LunarStrategy::MoonSwing, moon_swing);
        report.strategies.insert(LunarStrategy::InverseMoon, inverse_moon);
        report.strategies.insert(LunarStrategy::BuyHold, buy_hold);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figures_stay_within_their_ranges() {
        for seed in 0..200 {
            let report = IllustrativeGenerator::new(Some(seed)).generate(&[]).unwrap();
            let swing = report.get(LunarStrategy::MoonSwing).unwrap();
            let inverse = report.get(LunarStrategy::InverseMoon).unwrap();
            let hold = report.get(LunarStrategy::BuyHold).unwrap();

            assert!(swing.max_drawdown <= -0.05 && swing.max_drawdown > -0.20);
            assert!((0.4..0.8).contains(&swing.win_rate));
            assert!((10..30).contains(&swing.total_trades));
            assert!((-0.6..1.4).contains(&swing.sharpe_ratio));

            assert!((0.3..0.6).contains(&inverse.win_rate));
            assert!((10..30).contains(&inverse.total_trades));

            assert_eq!(hold.total_trades, 1);
            assert_eq!(hold.win_rate, 1.0);
            assert!((0.3..1.8).contains(&hold.sharpe_ratio));
            // base is in [-0.12, 0.18)
            assert!(hold.total_return >= -0.0841 && hold.total_return < 0.126);
        }
    }

    #[test]
    fn seeded_reports_are_reproducible() {
        let a = IllustrativeGenerator::new(Some(42)).generate(&[]).unwrap();
        let b = IllustrativeGenerator::new(Some(42)).generate(&[]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.mode, ReportMode::Illustrative);
    }
}
