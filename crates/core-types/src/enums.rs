use serde::{Deserialize, Serialize};
use std::fmt;

/// The named position of the moon within its cycle.
///
/// The astronomical classifier only ever produces `New`, `WaxingCrescent`,
/// `Full` and `WaningCrescent`. The Conway classifier uses all eight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseName {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl PhaseName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseName::New => "new",
            PhaseName::WaxingCrescent => "waxing-crescent",
            PhaseName::FirstQuarter => "first-quarter",
            PhaseName::WaxingGibbous => "waxing-gibbous",
            PhaseName::Full => "full",
            PhaseName::WaningGibbous => "waning-gibbous",
            PhaseName::LastQuarter => "last-quarter",
            PhaseName::WaningCrescent => "waning-crescent",
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the bars of a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSource {
    AlphaVantage,
    Synthetic,
}

impl DataSource {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, DataSource::Synthetic)
    }
}

/// Identifies which moon-phase classifier to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierId {
    /// Low-precision ephemeris, four named buckets. The system of record.
    #[default]
    Astronomical,
    /// Conway's integer moon-age approximation, eight named buckets.
    Conway,
}

impl ClassifierId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassifierId::Astronomical => "astronomical",
            ClassifierId::Conway => "conway",
        }
    }
}

impl std::str::FromStr for ClassifierId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astronomical" => Ok(ClassifierId::Astronomical),
            "conway" => Ok(ClassifierId::Conway),
            other => Err(format!(
                "unknown classifier '{other}', expected 'astronomical' or 'conway'"
            )),
        }
    }
}

/// How strategy reports are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    /// Long-only trade simulation over the annotated series.
    #[default]
    Simulated,
    /// Random figures within plausible ranges. Not derived from any prices.
    Illustrative,
}

impl ReportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportMode::Simulated => "simulated",
            ReportMode::Illustrative => "illustrative",
        }
    }
}
