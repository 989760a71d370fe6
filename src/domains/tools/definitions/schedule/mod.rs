//! Point-in-time tools resolved against the current season.

pub mod latest_results;
pub mod next_race;
pub mod race_schedule;
pub mod standings;

pub use latest_results::{LatestResultsTool, select_latest_race};
pub use next_race::{NextRaceTool, select_next_race};
pub use race_schedule::RaceScheduleTool;
pub use standings::{ConstructorStandingsTool, DriverStandingsTool};
