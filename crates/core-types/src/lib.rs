pub mod enums;
pub mod error;
pub mod period;
pub mod structs;
pub mod ticker;

// Re-export the core types to provide a clean public API.
pub use enums::{ClassifierId, DataSource, PhaseName, ReportMode};
pub use error::CoreError;
pub use period::{Period, parse_date};
pub use structs::{AnnotatedBar, DailyBar, MoonPhase, PhaseTransition};
pub use ticker::Ticker;
