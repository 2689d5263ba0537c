//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{InvalidPosition, Position, Station};
use crate::location::{LocationState, Permission};
use crate::routing::{Road, RoadStatus};
use crate::session::{LocationSnapshot, SearchOutcome};

/// Body of a station search.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Free-text query; missing means empty
    #[serde(default)]
    pub q: String,
}

/// What the browser reports after its own permission prompt and
/// geolocation attempt.
#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub permission: Permission,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationRequest {
    /// The reading, if the browser had one.
    ///
    /// Coordinates must come as a pair and be in range.
    pub fn reading(&self) -> Result<Option<Position>, LocationRequestError> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok(Some(Position::new(lat, lon)?)),
            (None, None) => Ok(None),
            _ => Err(LocationRequestError::Unpaired),
        }
    }
}

/// A malformed location report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationRequestError {
    #[error("latitude and longitude must be given together")]
    Unpaired,

    #[error(transparent)]
    Invalid(#[from] InvalidPosition),
}

/// A station as shown to the front end.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub id: String,
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub team: String,
}

impl From<&Station> for StationView {
    fn from(s: &Station) -> Self {
        Self {
            id: s.id.clone(),
            code: s.code.clone(),
            name: s.name.clone(),
            latitude: s.position.latitude(),
            longitude: s.position.longitude(),
            team: s.team.clone(),
        }
    }
}

/// The station directory.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub loaded_at: Option<DateTime<Utc>>,
    pub stations: Vec<StationView>,
}

/// Result of reloading the directory.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub count: usize,
}

/// A road as `[latitude, longitude]` pairs.
#[derive(Debug, Serialize)]
pub struct RoadView {
    pub status: RoadStatus,
    pub path: Vec<[f64; 2]>,
}

impl From<&Road> for RoadView {
    fn from(road: &Road) -> Self {
        Self {
            status: road.status,
            path: road
                .path
                .iter()
                .map(|p| [p.latitude(), p.longitude()])
                .collect(),
        }
    }
}

/// Result of a station search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub station: Option<StationView>,
    pub road: Option<RoadView>,
}

impl From<&SearchOutcome> for SearchResponse {
    fn from(outcome: &SearchOutcome) -> Self {
        Self {
            station: outcome.station.as_ref().map(StationView::from),
            road: outcome.road.as_ref().map(RoadView::from),
        }
    }
}

/// Location state and cached position.
#[derive(Debug, Serialize)]
pub struct LocationResponse {
    pub state: LocationState,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub fixed_at: Option<DateTime<Utc>>,
}

impl From<LocationSnapshot> for LocationResponse {
    fn from(snapshot: LocationSnapshot) -> Self {
        Self {
            state: snapshot.state,
            latitude: snapshot.position.map(|p| p.latitude()),
            longitude: snapshot.position.map(|p| p.longitude()),
            fixed_at: snapshot.fixed_at,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
