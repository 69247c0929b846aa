use core_types::PhaseName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full and new moon averages closer than this (in percentage points) are
/// reported as showing no correlation.
pub const CORRELATION_THRESHOLD: f64 = 0.5;
/// Volatility (percent) above which the stock is reported as highly volatile.
pub const HIGH_VOLATILITY: f64 = 3.0;
/// Volatility (percent) above which the stock is reported as moderately volatile.
pub const MODERATE_VOLATILITY: f64 = 1.5;

/// Summary statistics of a stock's behaviour against the lunar cycle.
///
/// Every return and volatility figure is a percentage (`1.5` means 1.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub full_moon_avg_return: f64,
    pub new_moon_avg_return: f64,
    pub volatility_near_transitions: f64,
    pub total_days_analyzed: usize,
    pub full_moon_days: usize,
    pub new_moon_days: usize,
    /// Breakdown for every phase name present in the window.
    pub phase_returns: BTreeMap<PhaseName, PhaseReturn>,
    pub correlation: Correlation,
    pub volatility_level: VolatilityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseReturn {
    pub days: usize,
    pub avg_return: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Correlation {
    None,
    FullMoonHigher,
    NewMoonHigher,
}

impl Correlation {
    pub fn from_returns(full_moon: f64, new_moon: f64) -> Self {
        if (full_moon - new_moon).abs() < CORRELATION_THRESHOLD {
            Correlation::None
        } else if full_moon > new_moon {
            Correlation::FullMoonHigher
        } else {
            Correlation::NewMoonHigher
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Correlation::None => "No significant lunar correlation",
            Correlation::FullMoonHigher => "Full moons outperform new moons",
            Correlation::NewMoonHigher => "New moons outperform full moons",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolatilityLevel {
    Stable,
    Moderate,
    High,
}

impl VolatilityLevel {
    pub fn from_volatility(volatility: f64) -> Self {
        if volatility > HIGH_VOLATILITY {
            VolatilityLevel::High
        } else if volatility > MODERATE_VOLATILITY {
            VolatilityLevel::Moderate
        } else {
            VolatilityLevel::Stable
        }
    }
}

impl Insights {
    /// Creates the zeroed report used for an empty window.
    pub fn new() -> Self {
        Self {
            full_moon_avg_return: 0.0,
            new_moon_avg_return: 0.0,
            volatility_near_transitions: 0.0,
            total_days_analyzed: 0,
            full_moon_days: 0,
            new_moon_days: 0,
            phase_returns: BTreeMap::new(),
            correlation: Correlation::None,
            volatility_level: VolatilityLevel::Stable,
        }
    }
}

impl Default for Insights {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_verdict_uses_half_point_threshold() {
        assert_eq!(Correlation::from_returns(0.3, 0.0), Correlation::None);
        assert_eq!(Correlation::from_returns(0.6, 0.0), Correlation::FullMoonHigher);
        assert_eq!(Correlation::from_returns(-1.0, 0.2), Correlation::NewMoonHigher);
    }

    #[test]
    fn volatility_levels() {
        assert_eq!(VolatilityLevel::from_volatility(3.5), VolatilityLevel::High);
        assert_eq!(VolatilityLevel::from_volatility(3.0), VolatilityLevel::Moderate);
        assert_eq!(VolatilityLevel::from_volatility(1.5), VolatilityLevel::Stable);
    }

    #[test]
    fn serializes_camel_case_with_kebab_phase_keys() {
        let mut insights = Insights::new();
        insights
            .phase_returns
            .insert(PhaseName::WaxingCrescent, PhaseReturn { days: 3, avg_return: 0.25 });
        let json = serde_json::to_value(&insights).unwrap();
        assert_eq!(json["totalDaysAnalyzed"], 0);
        assert_eq!(json["correlation"], "none");
        assert_eq!(json["phaseReturns"]["waxing-crescent"]["avgReturn"], 0.25);
    }
}
