//! Result status codes with a coarse category tag.

use std::fmt::Write as _;

use async_trait::async_trait;

use super::{listing, total_line};
use crate::api::Listing;
use crate::domains::tools::context::ToolContext;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{F1Tool, NoParams, Reply};

const RETIREMENT_WORDS: &[&str] = &[
    "engine",
    "gearbox",
    "transmission",
    "accident",
    "collision",
    "spun",
    "retired",
    "withdr",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Finished,
    Retirement,
    Other,
}

impl StatusCategory {
    pub fn of(status: &str) -> Self {
        let lower = status.to_lowercase();
        if lower.contains("finished") || lower.starts_with('+') {
            Self::Finished
        } else if RETIREMENT_WORDS.iter().any(|w| lower.contains(w)) {
            Self::Retirement
        } else {
            Self::Other
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::Retirement => "retirement",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusCodesTool;

#[async_trait]
impl F1Tool for StatusCodesTool {
    const NAME: &'static str = "get_status_codes";
    const DESCRIPTION: &'static str = "Get F1 status codes and DNF reasons";
    const FAILURE: &'static str = "Failed to get status codes";
    type Params = NoParams;

    async fn run(_params: NoParams, ctx: &ToolContext) -> ToolResult<Reply> {
        let Listing {
            rows: statuses,
            total,
        } = listing(ctx.api(), "status", |d| {
            d.into_status_table().map(|t| t.statuses)
        })
        .await?;
        if statuses.is_empty() {
            return Err(ToolError::no_data("no status codes found"));
        }

        let mut out = format!(
            "**Formula 1 Status Codes**\n\n{}\n\n",
            total_line("Status Codes", statuses.len(), total)
        );
        for entry in &statuses {
            let _ = writeln!(
                out,
                "  • {}: {} [{}] ({} results)",
                entry.status_id,
                entry.status,
                StatusCategory::of(&entry.status).tag(),
                entry.count
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

    #[test]
    fn test_categories() {
        assert_eq!(StatusCategory::of("Finished"), StatusCategory::Finished);
        assert_eq!(StatusCategory::of("+2 Laps"), StatusCategory::Finished);
        assert_eq!(StatusCategory::of("Engine"), StatusCategory::Retirement);
        assert_eq!(StatusCategory::of("Withdrew"), StatusCategory::Retirement);
        assert_eq!(StatusCategory::of("Disqualified"), StatusCategory::Other);
    }

    #[tokio::test]
    async fn test_upstream_order_with_tags() {
        let body = json!({"MRData": {"total": "3", "StatusTable": {"Status": [
            {"statusId": "5", "count": "2026", "status": "Engine"},
            {"statusId": "1", "count": "7654", "status": "Finished"},
            {"statusId": "2", "count": "84", "status": "Disqualified"}
        ]}}});
        let (ctx, _) = context(FakeApi::new().with_json("status?limit=100&offset=0", body));
        let text = result_text(&execute::<StatusCodesTool>(NoParams {}, &ctx).await);

        assert!(text.contains("**Total Status Codes:** 3\n"));
        assert!(text.contains("  • 5: Engine [retirement] (2026 results)\n  • 1: Finished [finished]"));
        assert!(text.contains("  • 2: Disqualified [other]"));
    }

    fn status_page(ids: std::ops::Range<u32>, total: u32) -> serde_json::Value {
        let statuses: Vec<_> = ids
            .map(|i| json!({"statusId": i.to_string(), "count": "1", "status": format!("Reason {i}")}))
            .collect();
        json!({"MRData": {"total": total.to_string(), "StatusTable": {"Status": statuses}}})
    }

    #[tokio::test]
    async fn test_lists_every_code_across_pages() {
        let api = FakeApi::new()
            .with_json("status?limit=100&offset=0", status_page(1..101, 139))
            .with_json("status?limit=100&offset=100", status_page(101..140, 139));
        let (ctx, api) = context(api);
        let text = result_text(&execute::<StatusCodesTool>(NoParams {}, &ctx).await);

        assert!(text.contains("**Total Status Codes:** 139\n"), "{text}");
        assert!(!text.contains("showing first"));
        assert_eq!(text.matches("  • ").count(), 139);
        assert!(text.contains("  • 1: Reason 1 [other]"));
        assert!(text.contains("  • 139: Reason 139 [other]"));
        assert_eq!(api.calls().len(), 2);
    }
}
