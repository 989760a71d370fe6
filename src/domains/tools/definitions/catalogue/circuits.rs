//! Every circuit known to upstream.

use std::fmt::Write as _;

use async_trait::async_trait;

use super::{listing, total_line};
use crate::api::Listing;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};

#[derive(Debug, Clone)]
pub struct CircuitsTool;

#[async_trait]
impl F1Tool for CircuitsTool {
    const NAME: &'static str = "get_all_circuits";
    const DESCRIPTION: &'static str = "Get all F1 circuits and tracks";
    const FAILURE: &'static str = "Failed to get circuits";
    type Params = NoParams;

    async fn run(_params: NoParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let Listing {
            rows: circuits,
            total,
        } = listing(ctx.api(), "circuits", |d| {
            d.into_circuit_table().map(|t| t.circuits)
        })
        .await?;
        if circuits.is_empty() {
            return Err(ToolError::no_data("no circuits found"));
        }

        let mut out = format!(
            "**Formula 1 Circuits Database**\n\n{}\n\n",
            total_line("Circuits", circuits.len(), total)
        );
        for circuit in &circuits {
            let _ = writeln!(
                out,
                "  • {} ({}, {})",
                circuit.circuit_name, circuit.location.locality, circuit.location.country
            );
        }

        Ok(Reply::Text(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeApi;
    use crate::domains::tools::handlers::execute;
    use crate::domains::tools::handlers::testing::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_upstream_order_and_count() {
        let body = json!({"MRData": {"total": "2", "CircuitTable": {"Circuits": [
            {"circuitId": "monza", "circuitName": "Autodromo Nazionale di Monza",
             "Location": {"locality": "Monza", "country": "Italy"}},
            {"circuitId": "albert_park", "circuitName": "Albert Park Grand Prix Circuit",
             "Location": {"locality": "Melbourne", "country": "Australia"}}
        ]}}});
        let (ctx, _) = context(FakeApi::new().with_json("circuits?limit=100&offset=0", body));
        let text = result_text(&execute::<CircuitsTool>(NoParams {}, &ctx).await);

        assert!(text.contains("**Total Circuits:** 2"));
        let monza = text.find("Monza (Monza, Italy)").unwrap();
        let melbourne = text.find("Albert Park Grand Prix Circuit (Melbourne, Australia)").unwrap();
        assert!(monza < melbourne);
    }
}
