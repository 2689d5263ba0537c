//! Road routing between positions.
//!
//! A [`RoadManager`] always yields a drawable [`Road`]; failures show up
//! in the road's status, never as an error.

mod direct;
mod error;
mod osrm;
mod polyline;
mod road;

use futures::future::BoxFuture;

use crate::domain::Position;

pub use direct::DirectRoadManager;
pub use error::RoutingError;
pub use osrm::{DEFAULT_OSRM_URL, OsrmConfig, OsrmRoadManager};
pub use polyline::{PolylineError, decode_polyline};
pub use road::{Road, RoadStatus};

/// A routing service.
///
/// `waypoints` are visited in order; callers in this crate only ever pass
/// a start and a destination.
pub trait RoadManager: Send + Sync {
    fn get_road<'a>(&'a self, waypoints: &'a [Position]) -> BoxFuture<'a, Road>;
}
