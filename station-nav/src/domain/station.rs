//! Station records.

use serde::Serialize;

use super::Position;

/// A station as held in the directory.
///
/// Immutable once built; the directory replaces stations wholesale rather
/// than editing them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    /// Record identifier from the feed.
    pub id: String,
    /// Identifier code shown to users (the "U-Nummer").
    pub code: String,
    /// Display name.
    pub name: String,
    pub position: Position,
    /// Grouping attribute (the team responsible for the station).
    pub team: String,
}

impl Station {
    /// Returns true if the display name or the code contains `needle`.
    ///
    /// `needle` must already be lowercased; see [`crate::search`].
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.code.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn central() -> Station {
        Station {
            id: "A1".into(),
            code: "U100".into(),
            name: "Central".into(),
            position: Position::new(49.6, 6.1).unwrap(),
            team: "North".into(),
        }
    }

    #[test]
    fn matches_name_or_code() {
        let s = central();
        assert!(s.matches_lowercase("cent"));
        assert!(s.matches_lowercase("u100"));
        assert!(s.matches_lowercase(""));
        assert!(!s.matches_lowercase("a1"));
        assert!(!s.matches_lowercase("north"));
    }
}
