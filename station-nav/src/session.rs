//! The navigation session.
//!
//! One [`Session`] owns everything that changes while the app runs: the
//! station directory, the current-position slot, the location state and
//! the map presenter. Collaborators (station feed, router, permission and
//! location providers) are injected, so the flow can run against fakes.
//!
//! All state sits behind a single async mutex, so completions from the
//! station feed, the location provider and the router apply one at a
//! time. The lock is never held across a network call.

use std::sync::{Arc, Weak};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::domain::{Position, Station};
use crate::location::{
    LocationEvent, LocationProvider, LocationState, Permission, PermissionGate,
};
use crate::map::{CURRENT_LOCATION_TITLE, FOCUS_ZOOM, MapPresenter, MapScene, Marker, PathOverlay};
use crate::routing::{Road, RoadManager};
use crate::search;
use crate::stations::{StationDirectory, StationError, StationSource, build_stations};

/// Result of a search: the matched station and, when the user's position
/// was known, the road drawn to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub station: Option<Station>,
    pub road: Option<Road>,
}

/// Where the location flow stands, plus the cached position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationSnapshot {
    pub state: LocationState,
    pub position: Option<Position>,
    pub fixed_at: Option<DateTime<Utc>>,
}

struct SessionState<P> {
    directory: StationDirectory,
    location: LocationState,
    current_position: Option<Position>,
    fixed_at: Option<DateTime<Utc>>,
    presenter: P,
    /// Bumped whenever the scene is rebuilt; a road computed for an older
    /// generation is not drawn.
    generation: u64,
    /// Alive while a `locate` call is running. Dead with the state still in
    /// flight means the call was dropped before it finished.
    locating: Weak<()>,
}

impl<P> SessionState<P> {
    fn advance(&mut self, event: LocationEvent) {
        match self.location.apply(event) {
            Ok(next) => self.location = next,
            Err(e) => tracing::warn!(error = %e, "ignoring location event"),
        }
    }

    /// Settle a location flow whose caller went away mid-flight.
    fn settle_abandoned(&mut self) {
        if self.location.is_in_flight() && self.locating.strong_count() == 0 {
            tracing::warn!(state = ?self.location, "location request abandoned");
            self.advance(LocationEvent::Abandoned);
        }
    }

    fn location_snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            state: self.location,
            position: self.current_position,
            fixed_at: self.fixed_at,
        }
    }
}

/// A single user's navigation session.
pub struct Session<P = MapScene> {
    stations: Arc<dyn StationSource>,
    router: Arc<dyn RoadManager>,
    state: Mutex<SessionState<P>>,
}

impl<P: MapPresenter> Session<P> {
    /// Create a session with an empty directory and no known position.
    pub fn new(
        stations: Arc<dyn StationSource>,
        router: Arc<dyn RoadManager>,
        presenter: P,
    ) -> Self {
        Self {
            stations,
            router,
            state: Mutex::new(SessionState {
                directory: StationDirectory::new(),
                location: LocationState::Unrequested,
                current_position: None,
                fixed_at: None,
                presenter,
                generation: 0,
                locating: Weak::new(),
            }),
        }
    }

    /// Fetch the station feed and replace the directory with it.
    ///
    /// On success every station gets a marker. A reload clears the map
    /// first and puts the user's marker back. On failure the directory
    /// and the map are left untouched.
    pub async fn load_stations(&self) -> Result<usize, StationError> {
        let dtos = match self.stations.fetch_all().await {
            Ok(dtos) => dtos,
            Err(e) => {
                tracing::warn!(error = %e, "station load failed, keeping current directory");
                return Err(e);
            }
        };
        let stations = build_stations(dtos);
        let count = stations.len();

        let mut state = self.state.lock().await;
        let reload = state.directory.loaded_at().is_some();
        if reload {
            state.presenter.clear_overlays();
            state.generation += 1;
        }
        for station in &stations {
            state
                .presenter
                .add_marker(Marker::new(station.position, station.name.clone()));
        }
        if reload && let Some(position) = state.current_position {
            state
                .presenter
                .add_marker(Marker::new(position, CURRENT_LOCATION_TITLE));
        }
        state.directory.replace(stations, Utc::now());

        tracing::info!(count, reload, "loaded stations");
        Ok(count)
    }

    /// Run the permission and last-known-location flow once.
    ///
    /// A request made while another is still in flight is ignored and the
    /// current state returned. A denied permission, an empty reading or a
    /// provider error leave the cached position as it was. If this future is
    /// dropped before it finishes, the next call settles the state to
    /// `LocationUnknown` and starts afresh.
    pub async fn locate(
        &self,
        gate: &dyn PermissionGate,
        provider: &dyn LocationProvider,
    ) -> LocationSnapshot {
        let _attempt = {
            let mut state = self.state.lock().await;
            state.settle_abandoned();
            if state.location.is_in_flight() {
                tracing::debug!(state = ?state.location, "location request already in flight");
                return state.location_snapshot();
            }
            let attempt = Arc::new(());
            state.locating = Arc::downgrade(&attempt);
            state.advance(LocationEvent::Requested);
            attempt
        };

        let permission = gate.request().await;

        {
            let mut state = self.state.lock().await;
            match permission {
                Permission::Granted => state.advance(LocationEvent::Granted),
                Permission::Denied => {
                    state.advance(LocationEvent::Denied);
                    tracing::info!("location permission denied");
                    return state.location_snapshot();
                }
            }
        }

        let reading = provider.last_known().await;

        let mut state = self.state.lock().await;
        match reading {
            Ok(Some(position)) => {
                state.advance(LocationEvent::Fixed);
                state.current_position = Some(position);
                state.fixed_at = Some(Utc::now());
                state.presenter.set_view(position, FOCUS_ZOOM);
                state
                    .presenter
                    .add_marker(Marker::new(position, CURRENT_LOCATION_TITLE));
                tracing::info!(%position, "location fixed");
            }
            Ok(None) => {
                state.advance(LocationEvent::NoFix);
                tracing::info!("no last known location");
            }
            Err(e) => {
                state.advance(LocationEvent::NoFix);
                tracing::warn!(error = %e, "location query failed");
            }
        }
        state.location_snapshot()
    }

    /// Search the directory and focus the map on the first match.
    ///
    /// On a match the map is centred on the station, cleared, and given a
    /// single marker for it. If the user's position is known a road to the
    /// station is requested and drawn whatever its status. No match leaves
    /// the map alone.
    pub async fn search(&self, query: &str) -> SearchOutcome {
        let (station, start, generation) = {
            let mut state = self.state.lock().await;
            let Some(station) = search::filter(query, state.directory.stations()).cloned() else {
                tracing::debug!(query, "no station matches");
                return SearchOutcome {
                    station: None,
                    road: None,
                };
            };

            state.presenter.set_view(station.position, FOCUS_ZOOM);
            state.presenter.clear_overlays();
            state
                .presenter
                .add_marker(Marker::new(station.position, station.name.clone()));
            state.generation += 1;

            (station, state.current_position, state.generation)
        };
        tracing::debug!(query, code = %station.code, name = %station.name, "station matched");

        let Some(start) = start else {
            return SearchOutcome {
                station: Some(station),
                road: None,
            };
        };

        let road = self.router.get_road(&[start, station.position]).await;
        if !road.is_ok() {
            tracing::warn!(status = ?road.status, code = %station.code, "drawing degraded road");
        }

        let mut state = self.state.lock().await;
        if state.generation == generation {
            state.presenter.add_path(PathOverlay {
                status: road.status,
                path: road.path.clone(),
            });
        } else {
            tracing::debug!(code = %station.code, "road superseded by a newer search");
        }

        SearchOutcome {
            station: Some(station),
            road: Some(road),
        }
    }

    /// Snapshot of the directory, in feed order.
    pub async fn stations(&self) -> Vec<Station> {
        self.state.lock().await.directory.stations().to_vec()
    }

    /// When the directory was last loaded.
    pub async fn stations_loaded_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.directory.loaded_at()
    }

    pub async fn location(&self) -> LocationSnapshot {
        let mut state = self.state.lock().await;
        state.settle_abandoned();
        state.location_snapshot()
    }

    /// Run `f` against the presenter while holding the session lock.
    pub async fn with_presenter<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        let state = self.state.lock().await;
        f(&state.presenter)
    }
}
