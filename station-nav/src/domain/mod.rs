//! Domain types for the station navigator.
//!
//! Types validate their invariants at construction time, so code that
//! receives a `Position` or `Station` can trust it.

mod position;
mod station;

pub use position::{InvalidPosition, Position};
pub use station::Station;
