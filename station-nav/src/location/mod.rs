//! Device location: permission gate, last-known provider, and the state
//! machine tracking where a location request stands.
//!
//! There is no continuous tracking. Each request is a single best-effort
//! snapshot.

mod provider;
mod state;

pub use provider::{
    LocationError, LocationProvider, Permission, PermissionGate, ReportedLocation,
    ReportedPermission,
};
pub use state::{InvalidTransition, LocationEvent, LocationState};
