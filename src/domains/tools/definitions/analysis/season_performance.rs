//! One driver's results across a single season.

use std::fmt::Write as _;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use super::stats::{DriverStats, fetch_driver, season_results, season_standings};
use crate::api::Season;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{
    driver_arg, format_points, parse_points, position_number,
};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, Reply};

const KEY_RESULTS: usize = 5;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SeasonPerformanceParams {
    #[schemars(description = "Driver ID (e.g., 'hamilton', 'max_verstappen', 'leclerc', 'norris')")]
    pub driver_id: String,

    #[schemars(description = "Season year to analyze (e.g., 2024, 2023) or leave empty for current season")]
    #[serde(default)]
    pub year: Option<u16>,
}

fn podium_marker(position: u32) -> &'static str {
    match position {
        1 => "🏆",
        2 => "🥈",
        _ => "🥉",
    }
}

#[derive(Debug, Clone)]
pub struct SeasonPerformanceTool;

#[async_trait]
impl F1Tool for SeasonPerformanceTool {
    const NAME: &'static str = "get_driver_season_performance";
    const DESCRIPTION: &'static str = "Get F1 driver season performance";
    const FAILURE: &'static str = "Failed to get driver season performance";
    type Params = SeasonPerformanceParams;

    async fn run(params: SeasonPerformanceParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let id = driver_arg("driver_id", &params.driver_id)?;
        let season = Season::from_arg(params.year);

        let races = season_results(ctx.api(), season, &id).await?;
        if races.is_empty() {
            return Err(ToolError::no_data(format!(
                "no race results for '{id}' in {}",
                season.label()
            )));
        }
        let standings = season_standings(ctx.api(), season, &id).await?;
        let driver = fetch_driver(ctx.api(), &id).await?;

        let stats = DriverStats::from_races(&races);
        let season_name = races
            .first()
            .map(|race| race.season.clone())
            .unwrap_or_else(|| season.to_string());
        let final_position = standings
            .last()
            .and_then(|list| list.driver_standings.first())
            .and_then(|standing| standing.position.clone())
            .unwrap_or_else(|| "N/A".to_string());

        let mut out = format!(
            "🏎️ **{} - {season_name} Season Performance**\n\n",
            driver.full_name()
        );
        let _ = write!(
            out,
            "**🏆 {season_name} Championship Performance:**\n\
             Final Championship Position: P{final_position}\n\
             Total Points: {}\n\
             Races Participated: {}\n\n",
            format_points(stats.points),
            stats.races
        );
        let _ = write!(
            out,
            "**📊 Season Statistics:**\n\
             🥇 Wins: {}\n\
             🏆 Podiums: {}\n\
             📈 Points Finishes: {}\n\
             🚩 DNFs/Retirements: {}\n\
             ⭐ Best Finish: {}\n\
             Win Rate: {:.1}%\n\
             Podium Rate: {:.1}%\n\n",
            stats.wins,
            stats.podiums,
            stats.points_finishes,
            stats.dnfs,
            stats
                .best_finish
                .map(|p| format!("P{p}"))
                .unwrap_or_else(|| "N/A".to_string()),
            stats.win_rate(),
            stats.podium_rate()
        );

        // Wins first, then the other podiums, each in round order.
        let mut key_results: Vec<(u32, String)> = races
            .iter()
            .flat_map(|race| race.results.iter().map(move |result| (race, result)))
            .filter_map(|(race, result)| {
                let position = position_number(&result.position).filter(|p| *p <= 3)?;
                let marker = podium_marker(position);
                Some((
                    position.min(2),
                    format!(
                        "{marker} R{} {}: P{position} ({} pts)",
                        race.round,
                        race.race_name,
                        format_points(parse_points(&result.points))
                    ),
                ))
            })
            .collect();
        key_results.sort_by_key(|(rank, _)| *rank);

        out.push_str("**🏁 Key Race Results:**\n");
        if key_results.is_empty() {
            out.push_str("No podium finishes\n");
        }
        for (_, line) in key_results.iter().take(KEY_RESULTS) {
            let _ = writeln!(out, "{line}");
        }
        if key_results.len() > KEY_RESULTS {
            let _ = writeln!(
                out,
                "... and {} more strong finishes",
                key_results.len() - KEY_RESULTS
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

    fn params(id: &str, year: Option<u16>) -> SeasonPerformanceParams {
        SeasonPerformanceParams {
            driver_id: id.to_string(),
            year,
        }
    }

    #[tokio::test]
    async fn test_season_summary() {
        let api = with_driver(FakeApi::new(), "norris")
            .with_json(
                "2024/drivers/norris/results?limit=100&offset=0",
                results_page(vec![
                    fixtures::race_with_results("2024", "1", "2024-03-02", vec![
                        fixtures::result("norris", "3", "15", "Finished"),
                    ]),
                    fixtures::race_with_results("2024", "2", "2024-03-09", vec![
                        fixtures::result("norris", "R", "0", "Engine"),
                    ]),
                    fixtures::race_with_results("2024", "3", "2024-03-24", vec![
                        fixtures::result("norris", "1", "25", "Finished"),
                    ]),
                ]),
            )
            .with_json(
                "2024/drivers/norris/driverStandings",
                standings_for("norris", "2024", "2", "374", "4"),
            );
        let (ctx, api) = context(api);
        let result = execute::<SeasonPerformanceTool>(params("norris", Some(2024)), &ctx).await;
        let text = result_text(&result);

        assert!(!is_error(&result), "{text}");
        assert!(text.starts_with("🏎️ **Lando Norris - 2024 Season Performance**"));
        assert!(text.contains("Final Championship Position: P2\nTotal Points: 40\nRaces Participated: 3"));
        assert!(text.contains("🚩 DNFs/Retirements: 1"));
        assert!(text.contains("⭐ Best Finish: P1"));
        assert!(text.contains("🏆 R3 Round 3 Grand Prix: P1 (25 pts)\n🥉 R1 Round 1 Grand Prix: P3 (15 pts)\n"));
        assert_eq!(
            api.calls(),
            vec![
                "2024/drivers/norris/results?limit=100&offset=0",
                "2024/drivers/norris/driverStandings",
                "drivers/norris",
            ]
        );
    }

    #[test]
    fn test_podium_markers() {
        assert_eq!(podium_marker(1), "🏆");
        assert_eq!(podium_marker(2), "🥈");
        assert_eq!(podium_marker(3), "🥉");
    }

    #[tokio::test]
    async fn test_no_results_for_season() {
        let api = FakeApi::new().with_json(
            "1990/drivers/norris/results?limit=100&offset=0",
            results_page(vec![]),
        );
        let (ctx, _) = context(api);
        let result = execute::<SeasonPerformanceTool>(params("norris", Some(1990)), &ctx).await;

        assert_eq!(
            result_text(&result),
            "Failed to get driver season performance: No data found: no race results for 'norris' in 1990"
        );
    }
}
