//! Drivers entered in the current season.

use std::fmt::Write as _;

use async_trait::async_trait;

use super::{listing, total_line};
use crate::api::Listing;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};

#[derive(Debug, Clone)]
pub struct DriversTool;

#[async_trait]
impl F1Tool for DriversTool {
    const NAME: &'static str = "get_current_drivers";
    const DESCRIPTION: &'static str = "Get current F1 drivers";
    const FAILURE: &'static str = "Failed to get current drivers";
    type Params = NoParams;

    async fn run(_params: NoParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let mut season = None;
        let Listing {
            rows: drivers,
            total,
        } = listing(ctx.api(), "current/drivers", |d| {
            let table = d.into_driver_table()?;
            season = season.take().or(table.season);
            Ok(table.drivers)
        })
        .await?;
        let season = season.as_deref().unwrap_or("Current");
        if drivers.is_empty() {
            return Err(ToolError::no_data(format!("no drivers found for the {season} season")));
        }

        let mut out = format!(
            "**{season} F1 Driver Lineup**\n\n{}\n\n",
            total_line("Drivers", drivers.len(), total)
        );
        for driver in &drivers {
            let number = driver
                .permanent_number
                .as_deref()
                .map(|n| format!(" (#{n})"))
                .unwrap_or_default();
            let code = driver
                .code
                .as_deref()
                .map(|c| format!(" [{c}]"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  • {}{number}{code} - {}",
                driver.full_name(),
                driver.nationality.as_deref().unwrap_or("Unknown")
            );
        }

        Ok(Reply::Text(out))
    }
}
