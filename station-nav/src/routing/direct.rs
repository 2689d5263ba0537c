//! Offline straight-line routing.

use futures::future::BoxFuture;

use crate::domain::Position;

use super::RoadManager;
use super::road::Road;

/// Road manager that joins the waypoints with straight segments.
///
/// Needs no network, so it keeps navigation usable offline and in
/// development.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRoadManager;

impl RoadManager for DirectRoadManager {
    fn get_road<'a>(&'a self, waypoints: &'a [Position]) -> BoxFuture<'a, Road> {
        let road = if waypoints.len() < 2 {
            Road::invalid(waypoints)
        } else {
            Road::ok(waypoints.to_vec())
        };
        Box::pin(async move { road })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RoadStatus;

    #[tokio::test]
    async fn joins_waypoints() {
        let a = Position::new(49.6, 6.1).unwrap();
        let b = Position::new(49.7, 6.2).unwrap();
        let road = DirectRoadManager.get_road(&[a, b]).await;
        assert_eq!(road.status, RoadStatus::Ok);
        assert_eq!(road.path, vec![a, b]);
    }

    #[tokio::test]
    async fn identical_endpoints_give_trivial_path() {
        let a = Position::new(49.6, 6.1).unwrap();
        let road = DirectRoadManager.get_road(&[a, a]).await;
        assert!(road.is_ok());
        assert!(road.path.iter().all(|p| *p == a));
    }

    #[tokio::test]
    async fn too_few_waypoints() {
        let road = DirectRoadManager.get_road(&[]).await;
        assert_eq!(road.status, RoadStatus::Invalid);
        assert!(road.path.is_empty());
    }
}
