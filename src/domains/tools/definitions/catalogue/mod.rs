//! Enumeration tools.
//!
//! Each lists one whole upstream collection in upstream order, paging
//! through it [`PAGE_SIZE`] rows at a time, and reports the total count
//! upstream declares.

pub mod circuits;
pub mod constructors;
pub mod drivers;
pub mod seasons;
pub mod status;

pub use circuits::CircuitsTool;
pub use constructors::ConstructorsTool;
pub use drivers::DriversTool;
pub use seasons::SeasonsTool;
pub use status::StatusCodesTool;

use crate::api::model::MrData;
use crate::api::{ApiRequest, ApiResult, ErgastApi, Listing, PAGE_SIZE, fetch_all_rows};

/// Every row of `template`, following upstream's offset paging.
pub(crate) async fn listing<T, F>(api: &dyn ErgastApi, template: &'static str, rows: F) -> ApiResult<Listing<T>>
where
    T: Send,
    F: FnMut(MrData) -> ApiResult<Vec<T>> + Send,
{
    fetch_all_rows(api, ApiRequest::new(template), rows).await
}

/// "**Total Circuits:** 77", noting truncation if the page cap was reached.
pub(crate) fn total_line(label: &str, shown: usize, total: u32) -> String {
    let total = (total as usize).max(shown);
    if shown < total {
        format!("**Total {label}:** {total} (showing first {shown})")
    } else {
        format!("**Total {label}:** {total}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_line() {
        assert_eq!(total_line("Teams", 10, 10), "**Total Teams:** 10");
        assert_eq!(
            total_line("Status Codes", 100, 139),
            "**Total Status Codes:** 139 (showing first 100)"
        );
        // Missing total falls back to the rows we have.
        assert_eq!(total_line("Teams", 3, 0), "**Total Teams:** 3");
    }
}
