//! Compact calendar of any season.

use std::fmt::Write as _;

use async_trait::async_trait;

use crate::api::{ApiRequest, PAGE_SIZE};
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::definitions::common::SeasonParams;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, Reply};

#[derive(Debug, Clone)]
pub struct HistoricalScheduleTool;

#[async_trait]
impl F1Tool for HistoricalScheduleTool {
    const NAME: &'static str = "get_historical_schedule";
    const DESCRIPTION: &'static str = "Get F1 race schedule for specific year";
    const FAILURE: &'static str = "Failed to get schedule";
    type Params = SeasonParams;

    async fn run(params: SeasonParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let season = params.season();
        let request = ApiRequest::new("{season}").season(season).limit(PAGE_SIZE);
        let table = ctx.api().get(&request).await?.into_race_table()?;

        if table.races.is_empty() {
            return Err(ToolError::no_data(format!("no races for {}", season.label())));
        }

        let name = table.season.unwrap_or_else(|| season.to_string());
        let mut out = format!("**F1 {name} Calendar** ({} races)\n\n", table.races.len());
        for race in &table.races {
            let _ = writeln!(
                out,
                "R{}: {} - {} ({})",
                race.round, race.race_name, race.circuit.location.locality, race.date
            );
        }

        Ok(Reply::Text(out))
    }
}
