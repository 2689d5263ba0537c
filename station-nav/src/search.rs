//! Station search.
//!
//! A linear scan over the directory in feed order: the first station whose
//! display name or code contains the query (ignoring case) wins. No
//! ranking and no fuzzy matching. At a city's worth of stations this is
//! cheap enough without an index.

use crate::domain::Station;

/// Find the first station whose name or code contains `query`.
///
/// The empty query matches every station, so it returns the first one.
///
/// # Examples
///
/// ```
/// use station_nav::domain::{Position, Station};
/// use station_nav::search::filter;
///
/// let hub = Station {
///     id: "A2".into(),
///     code: "U200".into(),
///     name: "North Hub".into(),
///     position: Position::new(49.7, 6.2).unwrap(),
///     team: "B".into(),
/// };
/// let stations = vec![hub];
///
/// assert_eq!(filter("HUB", &stations).map(|s| s.id.as_str()), Some("A2"));
/// assert!(filter("zzz", &stations).is_none());
/// ```
pub fn filter<'a>(query: &str, stations: &'a [Station]) -> Option<&'a Station> {
    let needle = query.to_lowercase();
    stations.iter().find(|s| s.matches_lowercase(&needle))
}
