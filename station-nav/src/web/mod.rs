//! Web layer for the station navigator.
//!
//! Serves the single map page and the JSON endpoints it drives.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
