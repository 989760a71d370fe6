//! Head-to-head comparison of two drivers.

use std::fmt::Write as _;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use super::stats::{DriverStats, driver_stats, fetch_driver};
use crate::api::Season;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{driver_arg, format_points};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, Reply};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CompareParams {
    #[schemars(description = "REQUIRED: First driver ID ('hamilton', 'max_verstappen', 'alonso')")]
    pub driver1_id: String,

    #[schemars(description = "REQUIRED: Second driver ID ('schumacher', 'vettel', 'rosberg')")]
    pub driver2_id: String,

    #[schemars(description = "Season year to compare (e.g., 2021) or leave empty / 0 for career comparison")]
    #[serde(default)]
    pub year: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Better {
    Higher,
    Lower,
}

fn leader<'a>(a: f64, b: f64, better: Better, first: &'a str, second: &'a str) -> &'a str {
    if a == b {
        return "=";
    }
    let first_ahead = match better {
        Better::Higher => a > b,
        Better::Lower => a < b,
    };
    if first_ahead { first } else { second }
}

fn optional_position(position: Option<u32>) -> String {
    position.map(|p| format!("P{p}")).unwrap_or_else(|| "-".to_string())
}

/// Fixed-width comparison table for two named drivers.
fn comparison_table(
    (name1, stats1): (&str, &DriverStats),
    (name2, stats2): (&str, &DriverStats),
) -> String {
    let width = name1.chars().count().max(name2.chars().count()).max(10) + 2;
    let count = |metric, a: u32, b: u32, better| {
        let lead = leader(f64::from(a), f64::from(b), better, name1, name2);
        (metric, a.to_string(), b.to_string(), lead)
    };
    // Missing positions rank behind every classified one.
    let rank = |metric, a: Option<u32>, b: Option<u32>| {
        let key = |p: Option<u32>| f64::from(p.unwrap_or(u32::MAX));
        let lead = leader(key(a), key(b), Better::Lower, name1, name2);
        (metric, optional_position(a), optional_position(b), lead)
    };

    let rows = [
        count("Races", stats1.races, stats2.races, Better::Higher),
        count("Wins", stats1.wins, stats2.wins, Better::Higher),
        count("Podiums", stats1.podiums, stats2.podiums, Better::Higher),
        (
            "Points",
            format_points(stats1.points),
            format_points(stats2.points),
            leader(stats1.points, stats2.points, Better::Higher, name1, name2),
        ),
        count("Fastest Laps", stats1.fastest_laps, stats2.fastest_laps, Better::Higher),
        count("DNFs", stats1.dnfs, stats2.dnfs, Better::Lower),
        count("Championships", stats1.championships, stats2.championships, Better::Higher),
        rank("Best Finish", stats1.best_finish, stats2.best_finish),
        rank("Best Championship", stats1.best_championship, stats2.best_championship),
    ];

    let mut out = String::from("```\n");
    let _ = writeln!(out, "{:<20}{:<width$}{:<width$}Leader", "Metric", name1, name2);
    let _ = writeln!(
        out,
        "{}{}{}{}",
        "-".repeat(20),
        "-".repeat(width),
        "-".repeat(width),
        "-".repeat(10)
    );
    for (metric, a, b, lead) in rows {
        let _ = writeln!(out, "{metric:<20}{a:<width$}{b:<width$}{lead}");
    }
    out.push_str("```\n");
    out
}

#[derive(Debug, Clone)]
pub struct CompareDriversTool;

#[async_trait]
impl F1Tool for CompareDriversTool {
    const NAME: &'static str = "compare_drivers";
    const DESCRIPTION: &'static str = "Compare two F1 drivers";
    const FAILURE: &'static str = "Failed to compare drivers";
    type Params = CompareParams;

    async fn run(params: CompareParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let id1 = driver_arg("driver1_id", &params.driver1_id)?;
        let id2 = driver_arg("driver2_id", &params.driver2_id)?;
        let season = params.year.filter(|y| *y != 0).map(Season::Year);
        info!(driver1 = %id1, driver2 = %id2, ?season, "Comparing drivers");

        let (driver1, driver2, stats1, stats2) = futures::try_join!(
            fetch_driver(ctx.api(), &id1),
            fetch_driver(ctx.api(), &id2),
            driver_stats(ctx.api(), &id1, season, ctx.clock),
            driver_stats(ctx.api(), &id2, season, ctx.clock),
        )?;

        let (name1, name2) = (driver1.full_name(), driver2.full_name());
        if let Some(season) = season {
            for (name, stats) in [(&name1, &stats1), (&name2, &stats2)] {
                if stats.races == 0 {
                    return Err(ToolError::no_data(format!("{name} has no results in {season}")));
                }
            }
        }
        let scope = match season {
            Some(season) => format!("{season} Season"),
            None => "Career".to_string(),
        };

        let mut out = format!("⚔️ **{scope} Comparison: {name1} vs {name2}**\n\n");
        if season.is_none() {
            out.push_str("Championship figures cover the last 10 seasons.\n\n");
        }
        out.push_str("**📊 STATISTICAL COMPARISON:**\n");
        out.push_str(&comparison_table((&name1, &stats1), (&name2, &stats2)));

        out.push_str("\n**🎯 SUCCESS RATES:**\n");
        for (name, stats) in [(&name1, &stats1), (&name2, &stats2)] {
            let _ = writeln!(
                out,
                "{name}: {:.1}% win rate, {:.1}% podium rate",
                stats.win_rate(),
                stats.podium_rate()
            );
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

    fn params(a: &str, b: &str, year: Option<u16>) -> CompareParams {
        CompareParams {
            driver1_id: a.to_string(),
            driver2_id: b.to_string(),
            year,
        }
    }

    fn with_season(api: FakeApi, driver: &str, position: &str, points: &str, champion: &str) -> FakeApi {
        with_driver(api, driver)
            .with_json(
                &format!("2021/drivers/{driver}/results?limit=100&offset=0"),
                results_page(vec![fixtures::race_with_results(
                    "2021",
                    "22",
                    "2021-12-12",
                    vec![fixtures::result(driver, position, points, "Finished")],
                )]),
            )
            .with_json(
                &format!("2021/drivers/{driver}/driverStandings"),
                standings_for(driver, "2021", champion, points, "0"),
            )
    }

    #[tokio::test]
    async fn test_season_comparison_contains_both_drivers() {
        let api = with_season(FakeApi::new(), "max_verstappen", "1", "26", "1");
        let api = with_season(api, "hamilton", "2", "18", "2");
        let (ctx, api) = context(api);
        let result =
            execute::<CompareDriversTool>(params("max_verstappen", "hamilton", Some(2021)), &ctx).await;
        let text = result_text(&result);

        assert!(!is_error(&result), "{text}");
        assert!(text.starts_with("⚔️ **2021 Season Comparison: Max Verstappen vs Lewis Hamilton**"));
        assert!(text.contains("Max Verstappen"));
        assert!(text.contains("Lewis Hamilton"));
        let wins = text.lines().find(|l| l.starts_with("Wins")).unwrap();
        assert!(wins.ends_with("Max Verstappen"));
        let races = text.lines().find(|l| l.starts_with("Races")).unwrap();
        assert!(races.ends_with('='));
        assert!(text.contains("Max Verstappen: 100.0% win rate, 100.0% podium rate"));
        assert!(text.contains("Lewis Hamilton: 0.0% win rate, 100.0% podium rate"));

        let mut calls = api.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "2021/drivers/hamilton/driverStandings",
                "2021/drivers/hamilton/results?limit=100&offset=0",
                "2021/drivers/max_verstappen/driverStandings",
                "2021/drivers/max_verstappen/results?limit=100&offset=0",
                "drivers/hamilton",
                "drivers/max_verstappen",
            ]
        );
    }

    #[tokio::test]
    async fn test_fails_entirely_when_second_driver_fails() {
        let api = with_season(FakeApi::new(), "max_verstappen", "1", "26", "1");
        let api = with_driver(api, "hamilton")
            .with_unreachable("2021/drivers/hamilton/driverStandings")
            .with_json(
                "2021/drivers/hamilton/results?limit=100&offset=0",
                results_page(vec![]),
            );
        let (ctx, _) = context(api);
        let result =
            execute::<CompareDriversTool>(params("max_verstappen", "hamilton", Some(2021)), &ctx).await;

        assert!(is_error(&result));
        let text = result_text(&result);
        assert!(text.starts_with("Failed to compare drivers: upstream unreachable"));
        assert!(!text.contains("STATISTICAL"));
    }

    #[tokio::test]
    async fn test_season_without_results_is_no_data() {
        let api = with_season(FakeApi::new(), "max_verstappen", "1", "26", "1");
        let api = with_driver(api, "hamilton")
            .with_json(
                "2021/drivers/hamilton/results?limit=100&offset=0",
                results_page(vec![]),
            )
            .with_json(
                "2021/drivers/hamilton/driverStandings",
                fixtures::driver_standings("2021", vec![]),
            );
        let (ctx, _) = context(api);
        let result =
            execute::<CompareDriversTool>(params("max_verstappen", "hamilton", Some(2021)), &ctx).await;

        assert!(is_error(&result));
        assert_eq!(
            result_text(&result),
            "Failed to compare drivers: No data found: Lewis Hamilton has no results in 2021"
        );
    }

    #[tokio::test]
    async fn test_unknown_second_driver() {
        let api = with_driver(FakeApi::new(), "hamilton")
            .with_json("drivers/nobody", fixtures::driver_table(vec![]));
        let (ctx, _) = context(api);
        let result = execute::<CompareDriversTool>(params("hamilton", "nobody", None), &ctx).await;

        assert_eq!(
            result_text(&result),
            "Failed to compare drivers: No data found: no driver with id 'nobody'"
        );
    }

    #[tokio::test]
    async fn test_zero_year_is_career() {
        let mut api = with_empty_career(with_driver(FakeApi::new(), "hamilton"), "hamilton");
        api = with_empty_career(with_driver(api, "leclerc"), "leclerc");
        for driver in ["hamilton", "leclerc"] {
            api = api.with_json(
                &format!("drivers/{driver}/results?limit=100&offset=0"),
                results_page(vec![]),
            );
        }
        let (ctx, api) = context(api);
        let result = execute::<CompareDriversTool>(params("hamilton", "leclerc", Some(0)), &ctx).await;
        let text = result_text(&result);

        assert!(!is_error(&result), "{text}");
        assert!(text.starts_with("⚔️ **Career Comparison: Lewis Hamilton vs Charles Leclerc**"));
        // Two driver lookups, then results plus ten standings seasons per driver.
        assert_eq!(api.calls().len(), 2 + 2 * 11);
    }

    #[test]
    fn test_leader() {
        assert_eq!(leader(2.0, 1.0, Better::Higher, "a", "b"), "a");
        assert_eq!(leader(2.0, 1.0, Better::Lower, "a", "b"), "b");
        assert_eq!(leader(1.0, 1.0, Better::Lower, "a", "b"), "=");
    }
}
