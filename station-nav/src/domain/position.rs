//! Geographic positions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing an out-of-range or non-finite position.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidPosition {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),

    #[error("coordinate text {0:?} is not a number")]
    NotANumber(String),
}

/// A latitude/longitude pair in decimal degrees (WGS84).
///
/// Both components are finite and within range by construction.
///
/// # Examples
///
/// ```
/// use station_nav::domain::Position;
///
/// let p = Position::new(49.6116, 6.1319).unwrap();
/// assert_eq!(p.latitude(), 49.6116);
///
/// assert!(Position::new(91.0, 0.0).is_err());
/// assert!(Position::new(0.0, f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    latitude: f64,
    longitude: f64,
}

impl Position {
    /// Create a position, validating both components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidPosition> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidPosition::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidPosition::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a position from the textual coordinates the station feed uses.
    ///
    /// Surrounding whitespace is ignored.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, InvalidPosition> {
        let lat = parse_coordinate(latitude)?;
        let lon = parse_coordinate(longitude)?;
        Self::new(lat, lon)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

fn parse_coordinate(text: &str) -> Result<f64, InvalidPosition> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| InvalidPosition::NotANumber(text.to_string()))
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}, {})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// Deserialization goes through [`Position::new`] so invalid input never
/// produces a `Position`.
impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            latitude: f64,
            longitude: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Position::new(raw.latitude, raw.longitude).map_err(serde::de::Error::custom)
    }
}
