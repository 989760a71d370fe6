//! Driver and constructor championship standings.

use std::fmt::Write as _;

use async_trait::async_trait;

use crate::api::model::StandingsList;
use crate::api::{ApiRequest, Season};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{
    SeasonParams, format_points, parse_points, position_key,
};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, Reply};

async fn fetch_standings(
    ctx: &ToolContext,
    template: &'static str,
    season: Season,
    what: &str,
) -> ToolResult<StandingsList> {
    let request = ApiRequest::new(template).season(season).limit(100);
    let table = ctx.api().get(&request).await?.into_standings_table()?;
    table
        .standings_lists
        .into_iter()
        .next()
        .ok_or_else(|| ToolError::no_data(format!("no {what} standings for {}", season.label())))
}

fn position_label(position: Option<&str>) -> &str {
    position.unwrap_or("-")
}

#[derive(Debug, Clone)]
pub struct DriverStandingsTool;

#[async_trait]
impl F1Tool for DriverStandingsTool {
    const NAME: &'static str = "get_current_standings";
    const DESCRIPTION: &'static str = "Get F1 driver championship standings";
    const FAILURE: &'static str = "Failed to get standings";
    type Params = SeasonParams;

    async fn run(params: SeasonParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let mut list =
            fetch_standings(ctx, "{season}/driverStandings", params.season(), "driver").await?;
        list.driver_standings
            .sort_by_key(|s| position_key(s.position.as_deref()));

        let mut out = format!("**F1 {} Driver Championship Standings**\n\n", list.season);
        for standing in &list.driver_standings {
            let team = standing
                .constructors
                .first()
                .map(|c| c.name.as_str())
                .unwrap_or("Unknown");
            let _ = write!(
                out,
                "**P{}: {}**\nTeam: {}\nPoints: {} | Wins: {}\nNationality: {}\n\n",
                position_label(standing.position.as_deref()),
                standing.driver.full_name(),
                team,
                format_points(parse_points(&standing.points)),
                standing.wins,
                standing.driver.nationality.as_deref().unwrap_or("Unknown")
            );
        }

        Ok(Reply::Text(out))
    }
}

#[derive(Debug, Clone)]
pub struct ConstructorStandingsTool;

#[async_trait]
impl F1Tool for ConstructorStandingsTool {
    const NAME: &'static str = "get_constructor_standings";
    const DESCRIPTION: &'static str = "Get F1 team championship standings";
    const FAILURE: &'static str = "Failed to get constructor standings";
    type Params = SeasonParams;

    async fn run(params: SeasonParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let mut list = fetch_standings(
            ctx,
            "{season}/constructorStandings",
            params.season(),
            "constructor",
        )
        .await?;
        list.constructor_standings
            .sort_by_key(|s| position_key(s.position.as_deref()));

        let mut out = format!("**F1 {} Constructor Championship Standings**\n\n", list.season);
        for standing in &list.constructor_standings {
            let _ = write!(
                out,
                "**P{}: {}**\nNationality: {}\nPoints: {} | Wins: {}\n\n",
                position_label(standing.position.as_deref()),
                standing.constructor.name,
                standing.constructor.nationality.as_deref().unwrap_or("Unknown"),
                format_points(parse_points(&standing.points)),
                standing.wins
            );
        }

        Ok(Reply::Text(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{FakeApi, fixtures};
    use crate::domains::tools::handlers::execute;
    use crate::domains::tools::handlers::testing::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_driver_standings_sorted_by_position() {
        let api = FakeApi::new().with_json(
            "2021/driverStandings?limit=100",
            fixtures::driver_standings(
                "2021",
                vec![
                    fixtures::driver_standing("hamilton", "2", "387.5", "8"),
                    fixtures::driver_standing("max_verstappen", "1", "395.5", "10"),
                ],
            ),
        );
        let (ctx, api) = context(api);
        let result = execute::<DriverStandingsTool>(SeasonParams { year: Some(2021) }, &ctx).await;
        let text = result_text(&result);

        assert!(!is_error(&result), "{text}");
        assert!(text.starts_with("**F1 2021 Driver Championship Standings**"));
        assert!(text.contains("**P1: Max Verstappen**\nTeam: team F1\nPoints: 395.5 | Wins: 10"));
        assert!(text.find("P1:").unwrap() < text.find("P2:").unwrap());
        assert_eq!(api.calls(), vec!["2021/driverStandings?limit=100"]);
    }

    #[tokio::test]
    async fn test_absent_year_means_current() {
        let (ctx, api) = context(FakeApi::new());
        let result = execute::<DriverStandingsTool>(SeasonParams::default(), &ctx).await;
        assert!(is_error(&result));
        assert_eq!(api.calls(), vec!["current/driverStandings?limit=100"]);
    }

    #[tokio::test]
    async fn test_empty_standings_is_no_data() {
        let api = FakeApi::new().with_json(
            "1949/driverStandings?limit=100",
            fixtures::driver_standings("1949", vec![]),
        );
        let (ctx, _) = context(api);
        let result = execute::<DriverStandingsTool>(SeasonParams { year: Some(1949) }, &ctx).await;
        assert!(is_error(&result));
        assert_eq!(
            result_text(&result),
            "Failed to get standings: No data found: no driver standings for 1949"
        );
    }

    #[tokio::test]
    async fn test_constructor_standings() {
        let body = json!({"MRData": {"total": "2", "StandingsTable": {"season": "2023",
            "StandingsLists": [{"season": "2023", "round": "22", "ConstructorStandings": [
                {"position": "2", "points": "409", "wins": "0",
                 "Constructor": {"constructorId": "mercedes", "name": "Mercedes", "nationality": "German"}},
                {"position": "1", "points": "860", "wins": "21",
                 "Constructor": {"constructorId": "red_bull", "name": "Red Bull", "nationality": "Austrian"}}
            ]}]}}});
        let api = FakeApi::new().with_json("2023/constructorStandings?limit=100", body);
        let (ctx, _) = context(api);
        let result =
            execute::<ConstructorStandingsTool>(SeasonParams { year: Some(2023) }, &ctx).await;
        let text = result_text(&result);

        assert!(text.starts_with("**F1 2023 Constructor Championship Standings**"));
        assert!(text.contains("**P1: Red Bull**\nNationality: Austrian\nPoints: 860 | Wins: 21"));
        assert!(text.find("Red Bull").unwrap() < text.find("Mercedes").unwrap());
    }
}
