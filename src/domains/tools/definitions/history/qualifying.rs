//! Qualifying classification with the session each driver reached.

use std::fmt::Write as _;

use async_trait::async_trait;

use crate::api::model::QualifyingResult;
use crate::api::{ApiRequest, PAGE_SIZE};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::{RaceParams, position_key, single_race};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, Reply};

/// Last qualifying session a driver set a time in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Session {
    Q1,
    Q2,
    Q3,
}

impl Session {
    fn marker(self) -> &'static str {
        match self {
            Self::Q3 => "🏆",
            Self::Q2 => "⚡",
            Self::Q1 => "📊",
        }
    }
}

/// Best session reached and the time set in it.
pub fn best_session(result: &QualifyingResult) -> Option<(Session, &str)> {
    [
        (Session::Q3, &result.q3),
        (Session::Q2, &result.q2),
        (Session::Q1, &result.q1),
    ]
    .into_iter()
    .find_map(|(session, time)| {
        time.as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| (session, t))
    })
}

#[derive(Debug, Clone)]
pub struct QualifyingTool;

#[async_trait]
impl F1Tool for QualifyingTool {
    const NAME: &'static str = "get_qualifying_results";
    const DESCRIPTION: &'static str = "Get F1 qualifying results";
    const FAILURE: &'static str = "Failed to get qualifying results";
    type Params = RaceParams;

    async fn run(params: RaceParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let request = ApiRequest::new("{season}/{round}/qualifying")
            .season(params.season())
            .round(params.round())
            .limit(PAGE_SIZE);
        let table = ctx.api().get(&request).await?.into_race_table()?;
        let mut race = single_race(table.races, || format!("no race for {}", params.label()))?;
        if race.qualifying_results.is_empty() {
            return Err(ToolError::no_data(format!(
                "no qualifying results for {}",
                params.label()
            )));
        }
        race.qualifying_results
            .sort_by_key(|r| position_key(Some(r.position.as_str())));

        let mut out = format!(
            "⏱️ **{} - Qualifying Results**\n\n**Circuit:** {}\n📅 **Date:** {}\n\n**🏁 STARTING GRID:**\n",
            race.race_name, race.circuit.circuit_name, race.date
        );

        let mut pole = None;
        for result in &race.qualifying_results {
            let (marker, time) = match best_session(result) {
                Some((session, time)) => {
                    if session == Session::Q3 && pole.is_none() {
                        pole = Some((result, time));
                    }
                    (session.marker(), time)
                }
                None => ("📊", "N/A"),
            };
            let _ = writeln!(
                out,
                "P{}: {marker} {} ({}) - {time}",
                result.position,
                result.driver.full_name(),
                result.constructor.name
            );
        }

        if let Some((sitter, time)) = pole {
            let _ = write!(
                out,
                "\n**🏆 POLE POSITION:** {} ({}) - {time}\n",
                sitter.driver.full_name(),
                sitter.constructor.name
            );
        }
        out.push_str("\n🏆 Q3 | ⚡ Q2 | 📊 Q1 (best session reached)");

        Ok(Reply::Text(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{FakeApi, fixtures};
    use crate::domains::tools::handlers::execute;
    use crate::domains::tools::handlers::testing::*;
    use serde_json::{Value, json};

    fn entry(driver: &str, position: &str, times: &[&str]) -> Value {
        let mut value = json!({
            "position": position,
            "Driver": fixtures::driver(driver),
            "Constructor": fixtures::constructor("team"),
        });
        for (key, time) in ["Q1", "Q2", "Q3"].iter().zip(times) {
            value[*key] = (*time).into();
        }
        value
    }

    fn qualifying(entries: Vec<Value>) -> Value {
        let mut race = fixtures::race("2024", "8", "2024-05-25");
        race["QualifyingResults"] = Value::Array(entries);
        fixtures::race_table(1, vec![race])
    }

    #[tokio::test]
    async fn test_grid_sorted_with_session_markers() {
        let api = FakeApi::new().with_json(
            "2024/8/qualifying?limit=100",
            qualifying(vec![
                entry("norris", "16", &["1:12.000"]),
                entry("hamilton", "11", &["1:11.500", "1:11.200"]),
                entry("leclerc", "1", &["1:11.000", "1:10.600", "1:10.270"]),
            ]),
        );
        let (ctx, _) = context(api);
        let params = RaceParams { year: Some(2024), round_num: Some(8) };
        let text = result_text(&execute::<QualifyingTool>(params, &ctx).await);

        assert!(text.contains(
            "P1: 🏆 Charles Leclerc (team F1) - 1:10.270\n\
             P11: ⚡ Lewis Hamilton (team F1) - 1:11.200\n\
             P16: 📊 Lando Norris (team F1) - 1:12.000\n"
        ));
        assert!(text.contains("**🏆 POLE POSITION:** Charles Leclerc (team F1) - 1:10.270"));
    }

    #[tokio::test]
    async fn test_round_zero_means_last() {
        let (ctx, api) = context(FakeApi::new());
        let params = RaceParams { year: Some(2023), round_num: Some(0) };
        let result = execute::<QualifyingTool>(params, &ctx).await;

        assert!(is_error(&result));
        assert_eq!(api.calls(), vec!["2023/last/qualifying?limit=100"]);
    }

    #[tokio::test]
    async fn test_missing_race_is_no_data() {
        let api = FakeApi::new().with_json(
            "2024/30/qualifying?limit=100",
            fixtures::race_table(0, vec![]),
        );
        let (ctx, _) = context(api);
        let params = RaceParams { year: Some(2024), round_num: Some(30) };
        let result = execute::<QualifyingTool>(params, &ctx).await;

        assert_eq!(
            result_text(&result),
            "Failed to get qualifying results: No data found: no race for 2024 round 30"
        );
    }
}
