//! Computed roads.

use serde::Serialize;

use crate::domain::Position;

/// Outcome reported by a routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadStatus {
    /// The service computed a road.
    Ok,
    /// The service could not be reached or could not compute a road.
    TechnicalIssue,
    /// The request itself was unusable (fewer than two waypoints).
    Invalid,
}

/// A path between waypoints plus the status of the request that produced it.
///
/// A road is always drawable: when routing fails the path falls back to
/// the straight line through the requested waypoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Road {
    pub status: RoadStatus,
    pub path: Vec<Position>,
}

impl Road {
    /// A successfully routed path.
    pub fn ok(path: Vec<Position>) -> Self {
        Self {
            status: RoadStatus::Ok,
            path,
        }
    }

    /// The straight-line stand-in used when routing fails.
    pub fn fallback(waypoints: &[Position]) -> Self {
        Self {
            status: RoadStatus::TechnicalIssue,
            path: waypoints.to_vec(),
        }
    }

    /// A road for a request with too few waypoints.
    pub fn invalid(waypoints: &[Position]) -> Self {
        Self {
            status: RoadStatus::Invalid,
            path: waypoints.to_vec(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == RoadStatus::Ok
    }
}
