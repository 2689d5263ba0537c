//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::location::{ReportedLocation, ReportedPermission};
use crate::map::MapScene;

use super::dto::*;
use super::state::AppState;
use super::templates::IndexTemplate;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/refresh", post(refresh_stations))
        .route("/api/search", post(search))
        .route("/api/location", get(location).post(locate))
        .route("/api/map", get(map_scene))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The map page.
async fn index_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let station_count = state.session.stations().await.len();
    let html = IndexTemplate { station_count }
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
    Ok(Html(html))
}

/// The whole station directory.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state.session.stations().await;
    Json(StationsResponse {
        loaded_at: state.session.stations_loaded_at().await,
        stations: stations.iter().map(StationView::from).collect(),
    })
}

/// Reload the directory from the feed.
async fn refresh_stations(State(state): State<AppState>) -> Result<Json<RefreshResponse>, AppError> {
    let count = state
        .session
        .load_stations()
        .await
        .map_err(|e| AppError::Upstream {
            message: e.to_string(),
        })?;
    Ok(Json(RefreshResponse { count }))
}

/// Search for a station and route to it.
///
/// A match redraws the map (focus, single marker, road), hence `POST`.
/// A query with no match is not an error: the response simply has no
/// station.
async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Json<SearchResponse> {
    let outcome = state.session.search(&req.q).await;
    Json(SearchResponse::from(&outcome))
}

/// Current location state.
async fn location(State(state): State<AppState>) -> Json<LocationResponse> {
    Json(state.session.location().await.into())
}

/// Run the location flow with what the browser reported.
async fn locate(
    State(state): State<AppState>,
    Json(req): Json<LocationRequest>,
) -> Result<Json<LocationResponse>, AppError> {
    let reading = req.reading().map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let snapshot = state
        .session
        .locate(&ReportedPermission(req.permission), &ReportedLocation(reading))
        .await;
    Ok(Json(snapshot.into()))
}

/// Everything currently drawn on the map.
async fn map_scene(State(state): State<AppState>) -> Json<MapScene> {
    Json(state.session.with_presenter(MapScene::clone).await)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream { message: String },
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        tracing::warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::routing::DirectRoadManager;
    use crate::session::Session;
    use crate::stations::{MockStationSource, StationDto};

    fn state() -> AppState {
        let stations = vec![StationDto {
            id: "A2".into(),
            u_nummer: "U200".into(),
            name: "North Hub".into(),
            latitude: "49.63".into(),
            longitude: "6.16".into(),
            equipe: "B".into(),
        }];
        AppState::new(Session::new(
            Arc::new(MockStationSource::new(stations)),
            Arc::new(DirectRoadManager),
            MapScene::new(),
        ))
    }

    #[tokio::test]
    async fn search_takes_a_json_body_and_redraws() {
        let state = state();
        state.session.load_stations().await.unwrap();

        let req: SearchRequest = serde_json::from_str(r#"{"q":"hub"}"#).unwrap();
        let Json(response) = search(State(state.clone()), Json(req)).await;
        assert_eq!(response.station.unwrap().code, "U200");

        let Json(scene) = map_scene(State(state)).await;
        assert_eq!(scene.markers().count(), 1);
        assert!(scene.viewport.is_some());
    }

    #[test]
    fn app_error_status_codes() {
        let response = AppError::BadRequest {
            message: "bad".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::Upstream {
            message: "feed down".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
