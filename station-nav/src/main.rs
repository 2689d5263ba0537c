use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use station_nav::config::{AppConfig, RouterConfig, StationSourceConfig};
use station_nav::map::MapScene;
use station_nav::routing::{DirectRoadManager, OsrmRoadManager, RoadManager};
use station_nav::session::Session;
use station_nav::stations::{MockStationSource, StationClient, StationSource};
use station_nav::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("station_nav=info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let stations: Arc<dyn StationSource> = match config.stations {
        StationSourceConfig::Remote(client_config) => {
            tracing::info!(url = %client_config.url, "using remote station feed");
            Arc::new(StationClient::new(client_config).expect("Failed to create station client"))
        }
        StationSourceConfig::File(path) => {
            tracing::info!(path = %path.display(), "using station file");
            Arc::new(MockStationSource::from_file(&path).expect("Failed to read station file"))
        }
    };

    let router: Arc<dyn RoadManager> = match config.router {
        RouterConfig::Osrm(osrm_config) => {
            tracing::info!(url = %osrm_config.base_url, "routing with OSRM");
            Arc::new(OsrmRoadManager::new(osrm_config).expect("Failed to create OSRM client"))
        }
        RouterConfig::Direct => {
            tracing::info!("routing with straight lines");
            Arc::new(DirectRoadManager)
        }
    };

    let state = AppState::new(Session::new(stations, router, MapScene::new()));

    // Load stations in the background; the page works (empty) until then.
    let session = state.session.clone();
    tokio::spawn(async move {
        match session.load_stations().await {
            Ok(count) => tracing::info!(count, "initial station load complete"),
            Err(e) => tracing::error!(error = %e, "initial station load failed, directory is empty"),
        }
    });

    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!(addr = %config.bind_addr, "station navigator listening");

    axum::serve(listener, app).await.expect("Server error");
}
