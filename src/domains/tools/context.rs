//! Everything a tool handler may depend on.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};

use crate::api::ErgastApi;
use crate::core::config::Config;

/// Source of "today" for point-in-time tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Current UTC date.
    System,
    /// A pinned date.
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Self::System => Utc::now().date_naive(),
            Self::Fixed(date) => *date,
        }
    }

    pub fn year(&self) -> i32 {
        self.today().year()
    }
}

/// Shared, read-only inputs passed to every handler call.
#[derive(Clone)]
pub struct ToolContext {
    pub config: Arc<Config>,
    pub api: Arc<dyn ErgastApi>,
    pub clock: Clock,
}

impl ToolContext {
    pub fn new(config: Arc<Config>, api: Arc<dyn ErgastApi>) -> Self {
        Self {
            config,
            api,
            clock: Clock::System,
        }
    }

    /// Replace the clock, typically with [`Clock::Fixed`] in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn api(&self) -> &dyn ErgastApi {
        self.api.as_ref()
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("server", &self.config.server.name)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let clock = Clock::Fixed(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.year(), 2024);
    }
}
