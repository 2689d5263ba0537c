//! Station feed client and the in-memory station directory.
//!
//! The directory is populated from a single fetch of the station feed and
//! replaced wholesale on each successful load.

mod client;
mod directory;
mod error;
mod mock;

use futures::future::BoxFuture;

pub use client::{
    DEFAULT_STATIONS_URL, StationClient, StationClientConfig, StationDto, parse_station_list,
};
pub use directory::{StationDirectory, build_stations};
pub use error::StationError;
pub use mock::MockStationSource;

/// Anything that can produce the full station list.
pub trait StationSource: Send + Sync {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<StationDto>, StationError>>;
}
