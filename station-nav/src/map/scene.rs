//! In-memory map scene.

use serde::Serialize;

use super::{MapPresenter, Marker, PathOverlay, Viewport};
use crate::domain::Position;

/// One overlay, in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Overlay {
    Marker(Marker),
    Path(PathOverlay),
}

/// Everything currently on the map.
///
/// `revision` increases on every change so clients can skip redraws.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapScene {
    pub viewport: Option<Viewport>,
    pub overlays: Vec<Overlay>,
    pub revision: u64,
}

impl MapScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.overlays.iter().filter_map(|o| match o {
            Overlay::Marker(m) => Some(m),
            Overlay::Path(_) => None,
        })
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathOverlay> {
        self.overlays.iter().filter_map(|o| match o {
            Overlay::Path(p) => Some(p),
            Overlay::Marker(_) => None,
        })
    }
}

impl MapPresenter for MapScene {
    fn set_view(&mut self, center: Position, zoom: f64) {
        self.viewport = Some(Viewport { center, zoom });
        self.revision += 1;
    }

    fn add_marker(&mut self, marker: Marker) {
        self.overlays.push(Overlay::Marker(marker));
        self.revision += 1;
    }

    fn add_path(&mut self, path: PathOverlay) {
        self.overlays.push(Overlay::Path(path));
        self.revision += 1;
    }

    fn clear_overlays(&mut self) {
        self.overlays.clear();
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RoadStatus;

    fn pos(lat: f64, lon: f64) -> Position {
        Position::new(lat, lon).unwrap()
    }

    #[test]
    fn records_in_order() {
        let mut scene = MapScene::new();
        scene.add_marker(Marker::new(pos(49.6, 6.1), "Central"));
        scene.add_path(PathOverlay {
            status: RoadStatus::Ok,
            path: vec![pos(49.6, 6.1), pos(49.7, 6.2)],
        });
        scene.set_view(pos(49.6, 6.1), 15.0);

        assert_eq!(scene.overlays.len(), 2);
        assert_eq!(scene.markers().count(), 1);
        assert_eq!(scene.paths().count(), 1);
        assert_eq!(scene.viewport.unwrap().zoom, 15.0);
        assert_eq!(scene.revision, 3);
    }

    #[test]
    fn clear_keeps_viewport() {
        let mut scene = MapScene::new();
        scene.set_view(pos(49.6, 6.1), 12.0);
        scene.add_marker(Marker::new(pos(49.6, 6.1), "Central"));
        scene.clear_overlays();

        assert!(scene.overlays.is_empty());
        assert!(scene.viewport.is_some());
    }

    #[test]
    fn serializes_tagged_overlays() {
        let mut scene = MapScene::new();
        scene.add_marker(Marker::new(pos(49.5, 6.0), "Central"));

        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["overlays"][0]["kind"], "marker");
        assert_eq!(json["overlays"][0]["title"], "Central");
        assert_eq!(json["overlays"][0]["position"]["latitude"], 49.5);
    }
}
