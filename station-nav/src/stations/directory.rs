//! The in-memory station directory.

use chrono::{DateTime, Utc};

use crate::domain::{Position, Station};

use super::client::StationDto;

/// All stations known to the session, in feed order.
///
/// Only ever replaced as a whole; individual stations are never edited
/// or removed.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: Vec<Station>,
    loaded_at: Option<DateTime<Utc>>,
}

impl StationDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection.
    pub fn replace(&mut self, stations: Vec<Station>, loaded_at: DateTime<Utc>) {
        self.stations = stations;
        self.loaded_at = Some(loaded_at);
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// When the current contents were fetched, if ever.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}

/// Convert feed records to stations, skipping any with unusable coordinates.
///
/// Order is preserved and duplicates are kept.
pub fn build_stations(dtos: Vec<StationDto>) -> Vec<Station> {
    dtos.into_iter()
        .filter_map(|dto| match Position::parse(&dto.latitude, &dto.longitude) {
            Ok(position) => Some(Station {
                id: dto.id,
                code: dto.u_nummer,
                name: dto.name,
                position,
                team: dto.equipe,
            }),
            Err(e) => {
                tracing::warn!(id = %dto.id, name = %dto.name, error = %e, "skipping station");
                None
            }
        })
        .collect()
}
