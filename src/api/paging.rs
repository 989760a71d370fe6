//! Offset pagination over race tables and flat enumerations.

use tracing::debug;

use super::client::ErgastApi;
use super::error::ApiResult;
use super::model::{MrData, Race, RaceTable};
use super::request::ApiRequest;

/// Rows per page; the upstream maximum.
pub const PAGE_SIZE: u32 = 100;

/// Upper bound on pages fetched for a single table.
pub const MAX_PAGES: u32 = 30;

/// Every row of a paged enumeration plus the total upstream declared.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub rows: Vec<T>,
    pub total: u32,
}

/// Walk `request` page by page until upstream's `total` is covered.
///
/// `on_page` receives the page index and body and returns how many rows it
/// found; an empty page ends the walk. Returns the last declared total.
async fn for_each_page<F>(api: &dyn ErgastApi, request: ApiRequest, mut on_page: F) -> ApiResult<u32>
where
    F: FnMut(u32, MrData) -> ApiResult<usize> + Send,
{
    let mut offset = request.current_offset();
    let mut total = 0;

    for page in 0..MAX_PAGES {
        let data = api
            .get(&request.clone().limit(PAGE_SIZE).offset(offset))
            .await?;
        total = data.total();
        let fetched = on_page(page, data)?;

        offset += PAGE_SIZE;
        debug!(page, offset, total, fetched, "Fetched page");
        if fetched == 0 || offset >= total {
            break;
        }
    }

    Ok(total)
}

/// Fetch every page of a flat enumeration (seasons, circuits, statuses...).
///
/// `rows` pulls the entries out of one page body.
pub async fn fetch_all_rows<T, F>(
    api: &dyn ErgastApi,
    request: ApiRequest,
    mut rows: F,
) -> ApiResult<Listing<T>>
where
    T: Send,
    F: FnMut(MrData) -> ApiResult<Vec<T>> + Send,
{
    let mut all = Vec::new();
    let total = for_each_page(api, request, |_, data| {
        let page = rows(data)?;
        let fetched = page.len();
        all.extend(page);
        Ok(fetched)
    })
    .await?;

    Ok(Listing { rows: all, total })
}

/// Fetch every page of a race-table resource and merge it into one table.
///
/// Ergast counts nested rows (results, laps, pit stops) rather than races,
/// so one race can straddle a page boundary; such continuations are folded
/// into the previous entry. Any page failure fails the whole fetch.
pub async fn fetch_all_races(api: &dyn ErgastApi, request: ApiRequest) -> ApiResult<RaceTable> {
    let mut merged = RaceTable::default();

    for_each_page(api, request, |page, data| {
        let table = data.into_race_table()?;
        if page == 0 {
            merged.season = table.season.clone();
            merged.round = table.round.clone();
        }
        let fetched = table.races.len();
        for race in table.races {
            push_race(&mut merged.races, race);
        }
        Ok(fetched)
    })
    .await?;

    Ok(merged)
}

fn push_race(races: &mut Vec<Race>, race: Race) {
    match races.last_mut() {
        Some(last) if last.same_weekend(&race) => last.absorb(race),
        _ => races.push(race),
    }
}
