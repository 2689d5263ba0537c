//! Application state for the web layer.

use std::sync::Arc;

use crate::session::Session;

/// Shared application state.
///
/// The server hosts a single navigation session, the one the map page
/// shows.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
}

impl AppState {
    pub fn new(session: Session) -> Self {
        Self {
            session: Arc::new(session),
        }
    }
}
