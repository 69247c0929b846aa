use crate::{IllustrativeGenerator, PhaseSimulator, StrategyReportGenerator};
use core_types::ReportMode;

/// Creates the generator for `mode`. `seed` only affects illustrative reports.
pub fn create_generator(mode: ReportMode, seed: Option<u64>) -> Box<dyn StrategyReportGenerator> {
    match mode {
        ReportMode::Simulated => Box::new(PhaseSimulator::new()),
        ReportMode::Illustrative => Box::new(IllustrativeGenerator::new(seed)),
    }
}
