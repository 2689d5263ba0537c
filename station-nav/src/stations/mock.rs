//! Offline station source.
//!
//! Serves a fixed station list, either built in memory or loaded from a
//! JSON file in the same shape as the live feed. Useful for development
//! without network access and for tests.

use std::path::Path;

use futures::future::BoxFuture;

use super::client::{StationDto, parse_station_list};
use super::error::StationError;
use super::StationSource;

/// Station source that serves a fixed list.
#[derive(Debug, Clone, Default)]
pub struct MockStationSource {
    stations: Vec<StationDto>,
    fail: bool,
}

impl MockStationSource {
    /// Serve the given stations.
    pub fn new(stations: Vec<StationDto>) -> Self {
        Self {
            stations,
            fail: false,
        }
    }

    /// Load stations from a JSON file shaped like the live feed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path).map_err(|e| StationError::File {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(Self::new(parse_station_list(&body)?))
    }

    /// A source whose every fetch fails, for exercising degraded paths.
    pub fn failing() -> Self {
        Self {
            stations: Vec::new(),
            fail: true,
        }
    }
}

impl StationSource for MockStationSource {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<StationDto>, StationError>> {
        Box::pin(async move {
            if self.fail {
                return Err(StationError::Api {
                    status: 503,
                    message: "mock station source is failing".to_string(),
                });
            }
            Ok(self.stations.clone())
        })
    }
}
