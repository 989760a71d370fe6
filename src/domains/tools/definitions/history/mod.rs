//! Historical per-season and per-race tools.

pub mod calendar;
pub mod lap_times;
pub mod pitstops;
pub mod qualifying;
pub mod sprint;

pub use calendar::HistoricalScheduleTool;
pub use lap_times::LapTimesTool;
pub use pitstops::PitStopsTool;
pub use qualifying::QualifyingTool;
pub use sprint::SprintTool;
