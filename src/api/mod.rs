//! Client for the Ergast-compatible Formula 1 statistics API.
//!
//! - `request.rs` - path templates, typed season/round/driver values
//! - `client.rs` - the `ErgastApi` seam and its reqwest implementation
//! - `model.rs` - typed DTOs for the `MRData` envelope
//! - `paging.rs` - offset pagination over race tables and enumerations
//! - `error.rs` - upstream failure kinds

mod client;
mod error;
pub mod model;
mod paging;
mod request;

#[cfg(test)]
pub mod testing;

pub use client::{ErgastApi, ErgastClient};
pub use error::{ApiError, ApiResult};
pub use model::{MrData, decode_body};
pub use paging::{Listing, MAX_PAGES, PAGE_SIZE, fetch_all_races, fetch_all_rows};
pub use request::{ApiRequest, DriverId, Round, Season};
