pub mod result;
pub mod state;

pub use result::{GradeReport, SessionSummary, SessionTally};
pub use state::{EngineSettings, EngineState};
