//! Driver statistics shared by the derived tools.
//!
//! Every fetch here is issued sequentially; the first failure aborts the
//! caller's whole composition.

use tracing::debug;

use crate::api::model::{Driver, Race, StandingsList};
use crate::api::{ApiRequest, DriverId, ErgastApi, Season, fetch_all_races};
use crate::domains::tools::context::Clock;
use crate::domains::tools::definitions::common::{
    is_finished, parse_points, position_number, rate,
};
use crate::domains::tools::error::{ToolError, ToolResult};

/// Seasons of standings looked up for a career view, ending at this year.
pub const CAREER_SEASONS: i32 = 10;

/// Aggregated results and standings for one driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriverStats {
    pub races: u32,
    pub wins: u32,
    pub podiums: u32,
    pub points: f64,
    pub points_finishes: u32,
    pub dnfs: u32,
    pub fastest_laps: u32,
    pub championships: u32,
    pub best_championship: Option<u32>,
    pub best_finish: Option<u32>,
}

impl DriverStats {
    /// Fold every result row in `races` (a driver-filtered result table).
    pub fn from_races(races: &[Race]) -> Self {
        let mut stats = Self::default();
        for result in races.iter().flat_map(|race| &race.results) {
            stats.races += 1;

            let points = parse_points(&result.points);
            stats.points += points;
            if points > 0.0 {
                stats.points_finishes += 1;
            }

            if let Some(position) = position_number(&result.position) {
                if position == 1 {
                    stats.wins += 1;
                }
                if position <= 3 {
                    stats.podiums += 1;
                }
                stats.best_finish = Some(stats.best_finish.map_or(position, |b| b.min(position)));
            }

            if !result.status.as_deref().is_some_and(is_finished) {
                stats.dnfs += 1;
            }

            let fastest = result
                .fastest_lap
                .as_ref()
                .and_then(|lap| lap.rank.as_deref());
            if fastest == Some("1") {
                stats.fastest_laps += 1;
            }
        }
        stats
    }

    /// Fold season-end standings (the driver's own entry in each list).
    pub fn add_standings(&mut self, lists: &[StandingsList]) {
        for standing in lists.iter().filter_map(|list| list.driver_standings.first()) {
            let Some(position) = standing.position.as_deref().and_then(position_number) else {
                continue;
            };
            if position == 1 {
                self.championships += 1;
            }
            self.best_championship = Some(
                self.best_championship
                    .map_or(position, |best| best.min(position)),
            );
        }
    }

    pub fn win_rate(&self) -> f64 {
        rate(self.wins, self.races)
    }

    pub fn podium_rate(&self) -> f64 {
        rate(self.podiums, self.races)
    }

    pub fn points_per_race(&self) -> f64 {
        if self.races == 0 {
            0.0
        } else {
            self.points / f64::from(self.races)
        }
    }
}

/// Basic driver record; an unknown id is a "no data" error.
pub async fn fetch_driver(api: &dyn ErgastApi, driver: &DriverId) -> ToolResult<Driver> {
    let request = ApiRequest::new("drivers/{driver}").driver(driver);
    api.get(&request)
        .await?
        .into_driver_table()?
        .drivers
        .into_iter()
        .next()
        .ok_or_else(|| ToolError::no_data(format!("no driver with id '{driver}'")))
}

/// Every race result for the driver, across all pages.
pub async fn career_results(api: &dyn ErgastApi, driver: &DriverId) -> ToolResult<Vec<Race>> {
    let request = ApiRequest::new("drivers/{driver}/results").driver(driver);
    Ok(fetch_all_races(api, request).await?.races)
}

/// The driver's race results within one season.
pub async fn season_results(
    api: &dyn ErgastApi,
    season: Season,
    driver: &DriverId,
) -> ToolResult<Vec<Race>> {
    let request = ApiRequest::new("{season}/drivers/{driver}/results")
        .season(season)
        .driver(driver);
    Ok(fetch_all_races(api, request).await?.races)
}

/// The driver's standings lists for one season (empty if they did not race).
pub async fn season_standings(
    api: &dyn ErgastApi,
    season: Season,
    driver: &DriverId,
) -> ToolResult<Vec<StandingsList>> {
    let request = ApiRequest::new("{season}/drivers/{driver}/driverStandings")
        .season(season)
        .driver(driver);
    Ok(api.get(&request).await?.into_standings_table()?.standings_lists)
}

/// Season-end standings over the last [`CAREER_SEASONS`] seasons, oldest first.
///
/// Upstream has no single career-standings resource, so each season is
/// requested in turn. Seasons without an entry are skipped.
pub async fn career_standings(
    api: &dyn ErgastApi,
    driver: &DriverId,
    clock: Clock,
) -> ToolResult<Vec<StandingsList>> {
    let last = clock.year();
    let mut lists = Vec::new();
    for year in (last - CAREER_SEASONS + 1)..=last {
        let Ok(year) = u16::try_from(year) else {
            continue;
        };
        let found = season_standings(api, Season::Year(year), driver).await?;
        debug!(driver = %driver, year, seasons = found.len(), "Fetched season standings");
        lists.extend(found);
    }
    Ok(lists)
}

/// Results plus standings for a season, or for the career when `season` is `None`.
pub async fn driver_stats(
    api: &dyn ErgastApi,
    driver: &DriverId,
    season: Option<Season>,
    clock: Clock,
) -> ToolResult<DriverStats> {
    let (races, standings) = match season {
        Some(season) => (
            season_results(api, season, driver).await?,
            season_standings(api, season, driver).await?,
        ),
        None => (
            career_results(api, driver).await?,
            career_standings(api, driver, clock).await?,
        ),
    };
    let mut stats = DriverStats::from_races(&races);
    stats.add_standings(&standings);
    Ok(stats)
}
