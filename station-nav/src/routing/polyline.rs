//! Encoded polyline decoding.
//!
//! OSRM returns route geometry in the Google encoded polyline format:
//! each coordinate is a zigzag-encoded delta from the previous one, split
//! into 5-bit chunks offset by 63 so they are printable ASCII.

use crate::domain::{InvalidPosition, Position};

/// Error returned for malformed polyline text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolylineError {
    #[error("invalid character {0:?} at byte {1}")]
    InvalidChar(char, usize),

    #[error("polyline ends in the middle of a value")]
    Truncated,

    #[error("decoded coordinate out of range: {0}")]
    OutOfRange(#[from] InvalidPosition),
}

/// Decode a polyline with the given precision (5 for OSRM's default).
///
/// # Examples
///
/// ```
/// use station_nav::routing::decode_polyline;
///
/// let path = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5).unwrap();
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[0].latitude(), 38.5);
/// assert_eq!(path[0].longitude(), -120.2);
/// ```
pub fn decode_polyline(encoded: &str, precision: u32) -> Result<Vec<Position>, PolylineError> {
    let factor = 10_f64.powi(precision as i32);
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut path = Vec::new();

    while index < bytes.len() {
        lat += next_delta(bytes, &mut index)?;
        if index >= bytes.len() {
            return Err(PolylineError::Truncated);
        }
        lon += next_delta(bytes, &mut index)?;
        path.push(Position::new(lat as f64 / factor, lon as f64 / factor)?);
    }

    Ok(path)
}

/// Read one zigzag-encoded value starting at `index`, advancing it.
fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(PolylineError::Truncated);
        };
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(PolylineError::InvalidChar(byte as char, *index));
        }
        *index += 1;

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
