//! Station navigator server.
//!
//! Shows stations on a map, finds the first station matching a typed
//! name or code, and draws a road to it from the user's last known
//! position.

pub mod config;
pub mod domain;
pub mod location;
pub mod map;
pub mod routing;
pub mod search;
pub mod session;
pub mod stations;
pub mod web;
