//! Career profile of a single driver.

use std::fmt::Write as _;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use super::stats::{DriverStats, career_results, career_standings, fetch_driver};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{
    driver_arg, format_points, parse_points, position_number,
};
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::handlers::{F1Tool, Reply};

const RECENT_SEASONS: usize = 5;
const RECENT_RACES: usize = 20;
const RECENT_WINS: usize = 5;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DriverProfileParams {
    #[schemars(
        description = "REQUIRED: Driver ID, usually the lowercase surname ('hamilton', 'leclerc', 'max_verstappen')"
    )]
    pub driver_id: String,
}

#[derive(Debug, Clone)]
pub struct DriverProfileTool;

#[async_trait]
impl F1Tool for DriverProfileTool {
    const NAME: &'static str = "get_driver_profile";
    const DESCRIPTION: &'static str = "Get F1 driver profile and career stats";
    const FAILURE: &'static str = "Failed to get driver profile";
    type Params = DriverProfileParams;

    async fn run(params: DriverProfileParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let id = driver_arg("driver_id", &params.driver_id)?;
        let driver = fetch_driver(ctx.api(), &id).await?;
        let standings = career_standings(ctx.api(), &id, ctx.clock).await?;
        let races = career_results(ctx.api(), &id).await?;

        let mut stats = DriverStats::from_races(&races);
        stats.add_standings(&standings);

        let mut out = format!(
            "**{} - F1 Career Profile**\n\n**📊 Personal Information:**\n",
            driver.full_name()
        );
        if let Some(number) = &driver.permanent_number {
            let _ = writeln!(out, "Car Number: #{number}");
        }
        if let Some(code) = &driver.code {
            let _ = writeln!(out, "Driver Code: {code}");
        }
        let _ = writeln!(
            out,
            "Nationality: {}",
            driver.nationality.as_deref().unwrap_or("Unknown")
        );
        if let Some(born) = &driver.date_of_birth {
            let _ = writeln!(out, "Date of Birth: {born}");
        }

        out.push_str("\n**🏆 Championship History:**\n");
        if standings.is_empty() {
            out.push_str("No standings in recent seasons\n");
        } else {
            if stats.championships > 0 {
                let _ = writeln!(out, "🏆 World Championships: {}", stats.championships);
            }
            if let Some(best) = stats.best_championship {
                let _ = writeln!(out, "Best Championship Finish: P{best}");
            }
            out.push_str("Recent Seasons Performance:\n");
            let skip = standings.len().saturating_sub(RECENT_SEASONS);
            for list in &standings[skip..] {
                if let Some(standing) = list.driver_standings.first() {
                    let _ = writeln!(
                        out,
                        "  {}: P{} ({} pts, {} wins)",
                        list.season,
                        standing.position.as_deref().unwrap_or("-"),
                        format_points(parse_points(&standing.points)),
                        standing.wins
                    );
                }
            }
        }

        out.push_str("\n**🏁 Career Statistics:**\n");
        if stats.races == 0 {
            out.push_str("No race results available\n");
        } else {
            let _ = write!(
                out,
                "Total Races: {}\nRace Wins: {}\nPodiums: {}\nTotal Points: {}\nDNFs: {}\nFastest Laps: {}\n",
                stats.races,
                stats.wins,
                stats.podiums,
                format_points(stats.points),
                stats.dnfs,
                stats.fastest_laps
            );
            if let Some(best) = stats.best_finish {
                let _ = writeln!(out, "Best Finish: P{best}");
            }
            let _ = write!(
                out,
                "Win Rate: {:.1}%\nPodium Rate: {:.1}%\nAvg Points/Race: {:.1}\n",
                stats.win_rate(),
                stats.podium_rate(),
                stats.points_per_race()
            );
        }

        let recent = &races[races.len().saturating_sub(RECENT_RACES)..];
        let wins: Vec<_> = recent
            .iter()
            .filter(|race| {
                race.results
                    .iter()
                    .any(|r| position_number(&r.position) == Some(1))
            })
            .collect();
        if !wins.is_empty() {
            out.push_str("\n**🏆 Recent Race Wins:**\n");
            for race in &wins[wins.len().saturating_sub(RECENT_WINS)..] {
                let _ = writeln!(out, "  {}: {}", race.season, race.race_name);
            }
        }

        if let Some(url) = &driver.url {
            let _ = write!(out, "\n🔗 More info: {url}");
        }

        Ok(Reply::Text(out))
    }
}

#[cfg(test)]
mod tests {
    use super::super::stats::fixtures::*;
    use super::*;
    use crate::api::testing::{FakeApi, fixtures};
    use crate::domains::tools::handlers::execute;
    use crate::domains::tools::handlers::testing::*;

    fn params(id: &str) -> DriverProfileParams {
        DriverProfileParams {
            driver_id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_profile() {
        let api = with_empty_career(with_driver(FakeApi::new(), "hamilton"), "hamilton")
            .with_json(
                "2020/drivers/hamilton/driverStandings",
                standings_for("hamilton", "2020", "1", "347", "11"),
            )
            .with_json(
                "drivers/hamilton/results?limit=100&offset=0",
                results_page(vec![
                    fixtures::race_with_results("2020", "1", "2020-07-05", vec![
                        fixtures::result("hamilton", "4", "12", "Finished"),
                    ]),
                    fixtures::race_with_results("2020", "2", "2020-07-12", vec![fastest(
                        fixtures::result("hamilton", "1", "26", "Finished"),
                    )]),
                ]),
            );
        let (ctx, api) = context(api);
        let result = execute::<DriverProfileTool>(params("hamilton"), &ctx).await;
        let text = result_text(&result);

        assert!(!is_error(&result), "{text}");
        assert!(text.starts_with("**Lewis Hamilton - F1 Career Profile**"));
        assert!(text.contains("🏆 World Championships: 1"));
        assert!(text.contains("  2020: P1 (347 pts, 11 wins)"));
        assert!(text.contains("Total Races: 2\nRace Wins: 1\nPodiums: 1\nTotal Points: 38\nDNFs: 0\nFastest Laps: 1\n"));
        assert!(text.contains("Win Rate: 50.0%"));
        assert!(text.contains("**🏆 Recent Race Wins:**\n  2020: Round 2 Grand Prix"));

        let calls = api.calls();
        assert_eq!(calls.first().map(String::as_str), Some("drivers/hamilton"));
        assert_eq!(calls.last().map(String::as_str), Some("drivers/hamilton/results?limit=100&offset=0"));
    }

    #[tokio::test]
    async fn test_unknown_driver_stops_early() {
        let api = FakeApi::new().with_json("drivers/nobody", fixtures::driver_table(vec![]));
        let (ctx, api) = context(api);
        let result = execute::<DriverProfileTool>(params("nobody"), &ctx).await;

        assert!(is_error(&result));
        assert_eq!(
            result_text(&result),
            "Failed to get driver profile: No data found: no driver with id 'nobody'"
        );
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_driver_id() {
        let (ctx, api) = context(FakeApi::new());
        let result = execute::<DriverProfileTool>(params("../seasons"), &ctx).await;

        assert!(is_error(&result));
        assert!(result_text(&result).contains("invalid argument: driver_id:"));
        assert!(api.calls().is_empty());
    }
}
