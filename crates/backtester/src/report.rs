use crate::strategy::LunarStrategy;
use core_types::ReportMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Performance of one strategy. Returns, drawdown and win rate are fractions
/// (`0.12` means 12%).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyMetrics {
    pub total_return: f64,
    pub annualized_return: f64,
    /// Never positive.
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub total_trades: u32,
    pub sharpe_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyReport {
    pub mode: ReportMode,
    pub strategies: BTreeMap<LunarStrategy, StrategyMetrics>,
}

impl StrategyReport {
    pub fn new(mode: ReportMode) -> Self {
        Self {
            mode,
            strategies: BTreeMap::new(),
        }
    }

    pub fn get(&self, strategy: LunarStrategy) -> Option<&StrategyMetrics> {
        self.strategies.get(&strategy)
    }
}
