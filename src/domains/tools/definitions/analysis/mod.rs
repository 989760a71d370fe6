//! Derived tools combining several upstream calls.

pub mod compare;
pub mod driver_profile;
pub mod race_analysis;
pub mod season_performance;
pub mod stats;

pub use compare::CompareDriversTool;
pub use driver_profile::DriverProfileTool;
pub use race_analysis::RaceAnalysisTool;
pub use season_performance::SeasonPerformanceTool;
pub use stats::DriverStats;
