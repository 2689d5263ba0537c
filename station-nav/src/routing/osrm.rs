//! OSRM road client.
//!
//! Requests a single driving route through the given waypoints from an
//! OSRM server and decodes its geometry. Failures degrade to a
//! straight-line fallback road.

use futures::future::BoxFuture;
use serde::Deserialize;

use crate::domain::Position;

use super::RoadManager;
use super::error::RoutingError;
use super::polyline::decode_polyline;
use super::road::Road;

/// Default base URL: the public OSRM demo server, driving profile.
pub const DEFAULT_OSRM_URL: &str = "https://router.project-osrm.org/route/v1/driving";

/// Precision of OSRM's default `polyline` geometry encoding.
const POLYLINE_PRECISION: u32 = 5;

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Route service base URL, including the profile
    pub base_url: String,
    /// User-Agent sent with every request (the public server requires one)
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Create a config for the public server with the given user agent.
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_OSRM_URL.to_string(),
            user_agent: user_agent.into(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for self-hosted servers or testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<RouteDto>,
}

#[derive(Debug, Deserialize)]
struct RouteDto {
    geometry: String,
}

/// Road manager backed by an OSRM route service.
#[derive(Debug, Clone)]
pub struct OsrmRoadManager {
    http: reqwest::Client,
    base_url: String,
}

impl OsrmRoadManager {
    /// Create a new OSRM client.
    pub fn new(config: OsrmConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Request a road, surfacing every failure as an error.
    ///
    /// Callers wanting the always-drawable behaviour should go through
    /// [`RoadManager::get_road`] instead.
    pub async fn route(&self, waypoints: &[Position]) -> Result<Road, RoutingError> {
        let url = route_url(&self.base_url, waypoints);
        tracing::debug!(%url, "requesting road");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("alternatives", "false"),
                ("overview", "full"),
                ("steps", "false"),
            ])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        // OSRM reports routing failures such as NoRoute with a 400 and a
        // JSON body, so try the body before giving up on the status.
        match parse_route_response(&body) {
            Ok(road) => Ok(road),
            Err(e) if status.is_success() => Err(e),
            Err(RoutingError::NoRoad { code }) => Err(RoutingError::NoRoad { code }),
            Err(_) => Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            }),
        }
    }
}

impl RoadManager for OsrmRoadManager {
    fn get_road<'a>(&'a self, waypoints: &'a [Position]) -> BoxFuture<'a, Road> {
        Box::pin(async move {
            if waypoints.len() < 2 {
                return Road::invalid(waypoints);
            }
            match self.route(waypoints).await {
                Ok(road) => road,
                Err(e) => {
                    tracing::warn!(error = %e, "routing failed, using straight line");
                    Road::fallback(waypoints)
                }
            }
        })
    }
}

/// Build the route URL. OSRM takes coordinates as `lon,lat` pairs
/// separated by `;`.
fn route_url(base_url: &str, waypoints: &[Position]) -> String {
    let coords = waypoints
        .iter()
        .map(|p| format!("{},{}", p.longitude(), p.latitude()))
        .collect::<Vec<_>>()
        .join(";");
    format!("{}/{}", base_url.trim_end_matches('/'), coords)
}

/// Turn an OSRM JSON body into a road.
fn parse_route_response(body: &str) -> Result<Road, RoutingError> {
    let response: RouteResponse =
        serde_json::from_str(body).map_err(|e| RoutingError::Malformed {
            message: e.to_string(),
        })?;

    if response.code != "Ok" {
        if let Some(message) = &response.message {
            tracing::debug!(code = %response.code, %message, "OSRM refused route");
        }
        return Err(RoutingError::NoRoad {
            code: response.code,
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::NoRoad {
            code: "NoRoute".to_string(),
        })?;

    let path = decode_polyline(&route.geometry, POLYLINE_PRECISION).map_err(|e| {
        RoutingError::Malformed {
            message: e.to_string(),
        }
    })?;

    Ok(Road::ok(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RoadStatus;

    fn pos(lat: f64, lon: f64) -> Position {
        Position::new(lat, lon).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = OsrmConfig::new("station-nav-test");
        assert_eq!(config.base_url, DEFAULT_OSRM_URL);
        assert_eq!(config.user_agent, "station-nav-test");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builders() {
        let config = OsrmConfig::new("ua")
            .with_base_url("http://localhost:5000/route/v1/car")
            .with_timeout(3);
        assert_eq!(config.base_url, "http://localhost:5000/route/v1/car");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn url_is_lon_lat() {
        let url = route_url(
            "http://osrm.test/route/v1/driving/",
            &[pos(49.6, 6.1), pos(49.65, 6.15)],
        );
        assert_eq!(url, "http://osrm.test/route/v1/driving/6.1,49.6;6.15,49.65");
    }

    #[test]
    fn parse_ok_response() {
        let body = r#"{
            "code": "Ok",
            "routes": [{"geometry": "_ovmH_lfd@owHowH", "distance": 6500.2, "duration": 540.1}],
            "waypoints": []
        }"#;

        let road = parse_route_response(body).unwrap();
        assert_eq!(road.status, RoadStatus::Ok);
        assert_eq!(road.path, vec![pos(49.6, 6.1), pos(49.65, 6.15)]);
    }

    #[test]
    fn parse_no_route() {
        let body = r#"{"code": "NoRoute", "message": "Impossible route between points"}"#;
        let err = parse_route_response(body).unwrap_err();
        assert!(matches!(err, RoutingError::NoRoad { code } if code == "NoRoute"));
    }

    #[test]
    fn parse_ok_without_routes() {
        let err = parse_route_response(r#"{"code": "Ok", "routes": []}"#).unwrap_err();
        assert!(matches!(err, RoutingError::NoRoad { .. }));
    }

    #[test]
    fn parse_garbage() {
        let err = parse_route_response("Bad Gateway").unwrap_err();
        assert!(matches!(err, RoutingError::Malformed { .. }));
    }

    #[test]
    fn parse_bad_geometry() {
        let err = parse_route_response(r#"{"code": "Ok", "routes": [{"geometry": "_p~iF"}]}"#)
            .unwrap_err();
        assert!(matches!(err, RoutingError::Malformed { .. }));
    }

    #[tokio::test]
    async fn single_waypoint_is_invalid() {
        let manager = OsrmRoadManager::new(OsrmConfig::new("ua")).unwrap();
        let road = manager.get_road(&[pos(49.6, 6.1)]).await;
        assert_eq!(road.status, RoadStatus::Invalid);
        assert_eq!(road.path, vec![pos(49.6, 6.1)]);
    }

    #[tokio::test]
    async fn unreachable_server_falls_back() {
        // Port 9 on localhost is the discard service; nothing answers HTTP there.
        let config = OsrmConfig::new("ua")
            .with_base_url("http://127.0.0.1:9/route/v1/driving")
            .with_timeout(2);
        let manager = OsrmRoadManager::new(config).unwrap();
        let waypoints = [pos(49.6, 6.1), pos(49.65, 6.15)];

        let road = manager.get_road(&waypoints).await;
        assert_eq!(road.status, RoadStatus::TechnicalIssue);
        assert_eq!(road.path, waypoints.to_vec());
    }
}
