//! Tool definitions module.
//!
//! One file per tool, grouped by category:
//!
//! - `session/` - channel check, server metadata and trivia (no upstream)
//! - `schedule/` - point-in-time views of the current season
//! - `catalogue/` - enumerations of seasons, circuits, drivers, teams, statuses
//! - `history/` - per-season and per-race historical data
//! - `analysis/` - derived tools that combine several upstream calls

pub mod analysis;
pub mod catalogue;
pub mod common;
pub mod history;
pub mod schedule;
pub mod session;

pub use analysis::{CompareDriversTool, DriverProfileTool, RaceAnalysisTool, SeasonPerformanceTool};
pub use catalogue::{CircuitsTool, ConstructorsTool, DriversTool, SeasonsTool, StatusCodesTool};
pub use history::{HistoricalScheduleTool, LapTimesTool, PitStopsTool, QualifyingTool, SprintTool};
pub use schedule::{
    ConstructorStandingsTool, DriverStandingsTool, LatestResultsTool, NextRaceTool,
    RaceScheduleTool,
};
pub use session::{AboutTool, TriviaTool, ValidateTool};
