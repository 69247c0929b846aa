use crate::error::BacktestError;
use crate::report::{StrategyMetrics, StrategyReport};
use crate::strategy::{Action, LunarStrategy};
use crate::{StrategyReportGenerator, ensure_ascending};
use core_types::{AnnotatedBar, ReportMode};

const TRADING_DAYS_PER_YEAR: f64 = 252.0;
const DAYS_PER_YEAR: f64 = 365.0;

/// Replays each strategy over the annotated series.
///
/// Long-only, fully invested while holding, fills at the close. A position
/// still open after the last bar is closed at its close.
#[derive(Debug, Default)]
pub struct PhaseSimulator {}

impl PhaseSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a single strategy, starting from an equity of 1.
    pub fn simulate(&self, strategy: LunarStrategy, series: &[AnnotatedBar]) -> StrategyMetrics {
        if series.is_empty() {
            return StrategyMetrics::default();
        }

        let mut cash = 1.0;
        let mut shares = 0.0;
        let mut entry_price: Option<f64> = None;
        let mut trades = 0u32;
        let mut winners = 0u32;
        let mut equity_curve = Vec::with_capacity(series.len());

        for (index, bar) in series.iter().enumerate() {
            let close = bar.close();
            match strategy.action(index, series.len(), bar.phase(), entry_price.is_some()) {
                Some(Action::Buy) => {
                    shares = cash / close;
                    cash = 0.0;
                    entry_price = Some(close);
                }
                Some(Action::Sell) => {
                    cash = shares * close;
                    shares = 0.0;
                    if let Some(entry) = entry_price.take() {
                        trades += 1;
                        if close > entry {
                            winners += 1;
                        }
                    }
                }
                None => {}
            }
            equity_curve.push(cash + shares * close);
        }

        if let (Some(entry), Some(last)) = (entry_price, series.last()) {
            trades += 1;
            if last.close() > entry {
                winners += 1;
            }
        }

        let total_return = equity_curve.last().copied().unwrap_or(1.0) - 1.0;
        let span_days = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (last.date() - first.date()).num_days(),
            _ => 0,
        };

        StrategyMetrics {
            total_return,
            annualized_return: annualize(total_return, span_days),
            max_drawdown: max_drawdown(&equity_curve),
            win_rate: if trades > 0 {
                f64::from(winners) / f64::from(trades)
            } else {
                0.0
            },
            total_trades: trades,
            sharpe_ratio: sharpe_ratio(&equity_curve),
        }
    }
}

impl StrategyReportGenerator for PhaseSimulator {
    fn mode(&self) -> ReportMode {
        ReportMode::Simulated
    }

    fn generate(&mut self, series: &[AnnotatedBar]) -> Result<StrategyReport, BacktestError> {
        ensure_ascending(series)?;

        let mut report = StrategyReport::new(self.mode());
        for strategy in LunarStrategy::ALL {
            let metrics = self.simulate(strategy, series);
            tracing::debug!(
                strategy = strategy.as_str(),
                total_return = metrics.total_return,
                trades = metrics.total_trades,
                "Simulated strategy."
            );
            report.strategies.insert(strategy, metrics);
        }
        Ok(report)
    }
}

fn annualize(total_return: f64, span_days: i64) -> f64 {
    if span_days <= 0 {
        return total_return;
    }
    (1.0 + total_return).powf(DAYS_PER_YEAR / span_days as f64) - 1.0
}

fn max_drawdown(equity_curve: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;
    for &equity in equity_curve {
        peak = peak.max(equity);
        worst = worst.min(equity / peak - 1.0);
    }
    worst
}

fn sharpe_ratio(equity_curve: &[f64]) -> f64 {
    let returns: Vec<f64> = equity_curve
        .windows(2)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .collect();
    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();
    if std_dev < 1e-12 {
        return 0.0;
    }
    mean / std_dev * TRADING_DAYS_PER_YEAR.sqrt()
}
