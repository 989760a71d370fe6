//! Sprint race classification.

use std::fmt::Write as _;

use async_trait::async_trait;

use crate::api::{ApiRequest, PAGE_SIZE};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{RaceParams, result_line, single_race};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, Reply};

#[derive(Debug, Clone)]
pub struct SprintTool;

#[async_trait]
impl F1Tool for SprintTool {
    const NAME: &'static str = "get_sprint_results";
    const DESCRIPTION: &'static str = "Get F1 sprint race results";
    const FAILURE: &'static str = "Failed to get sprint results";
    type Params = RaceParams;

    async fn run(params: RaceParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let request = ApiRequest::new("{season}/{round}/sprint")
            .season(params.season())
            .round(params.round())
            .limit(PAGE_SIZE);
        let table = ctx.api().get(&request).await?.into_race_table()?;
        let race = single_race(table.races, || {
            format!("no sprint race for {}", params.label())
        })?;
        if race.sprint_results.is_empty() {
            return Err(ToolError::no_data(format!(
                "no sprint results for {}",
                params.label()
            )));
        }

        let location = &race.circuit.location;
        let mut out = format!(
            "**{} - Sprint Results**\n\n**Circuit:** {}\n**Location:** {}, {}\n**Date:** {}\n\n**SPRINT RACE RESULTS:**\n",
            race.race_name, race.circuit.circuit_name, location.locality, location.country, race.date
        );
        for result in &race.sprint_results {
            let _ = writeln!(out, "{}", result_line(result));
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
    use serde_json::Value;

    #[tokio::test]
    async fn test_sprint_classification() {
        let mut race = fixtures::race("2024", "6", "2024-05-04");
        race["SprintResults"] = Value::Array(vec![
            fixtures::result("max_verstappen", "1", "8", "Finished"),
            fixtures::result("leclerc", "2", "7", "Engine"),
        ]);
        let api = FakeApi::new().with_json(
            "2024/6/sprint?limit=100",
            fixtures::race_table(2, vec![race]),
        );
        let (ctx, _) = context(api);
        let params = RaceParams { year: Some(2024), round_num: Some(6) };
        let text = result_text(&execute::<SprintTool>(params, &ctx).await);

        assert!(text.starts_with("**Round 6 Grand Prix - Sprint Results**"));
        assert!(text.contains("P1: Max Verstappen (team F1) - 8 pts (Finished)\nP2: Charles Leclerc (team F1) - 7 pts (Engine)\n"));
    }

    #[tokio::test]
    async fn test_weekend_without_sprint() {
        let api = FakeApi::new().with_json(
            "2024/1/sprint?limit=100",
            fixtures::race_table(0, vec![]),
        );
        let (ctx, _) = context(api);
        let params = RaceParams { year: Some(2024), round_num: Some(1) };
        let result = execute::<SprintTool>(params, &ctx).await;

        assert!(is_error(&result));
        assert!(result_text(&result).contains("No data found: no sprint race for 2024 round 1"));
    }
}
