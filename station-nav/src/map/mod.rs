//! Map presentation.
//!
//! The session drives a [`MapPresenter`] with markers, paths and viewport
//! changes. Nothing flows back from the presenter. [`MapScene`] is the
//! in-memory presenter the web front end renders.

mod scene;

use serde::Serialize;

use crate::domain::Position;
use crate::routing::RoadStatus;

pub use scene::{MapScene, Overlay};

/// Zoom level used when centring on a station or the user.
pub const FOCUS_ZOOM: f64 = 15.0;

/// Title of the marker placed at the user's position.
pub const CURRENT_LOCATION_TITLE: &str = "Current Location";

/// A labelled point on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: Position,
    pub title: String,
}

impl Marker {
    pub fn new(position: Position, title: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
        }
    }
}

/// A drawn road. The status lets the renderer style fallback lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathOverlay {
    pub status: RoadStatus,
    pub path: Vec<Position>,
}

/// Map centre and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: Position,
    pub zoom: f64,
}

/// Receives drawing commands. Implementations must not fail.
pub trait MapPresenter: Send {
    fn set_view(&mut self, center: Position, zoom: f64);
    fn add_marker(&mut self, marker: Marker);
    fn add_path(&mut self, path: PathOverlay);
    fn clear_overlays(&mut self);
}
