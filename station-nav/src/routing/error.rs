//! Routing error types.
//!
//! These never reach callers of [`super::RoadManager`]: a failed request
//! is logged and turned into a fallback road.

/// Errors from the OSRM client.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned a non-success HTTP status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Service answered but found no road (e.g. "NoRoute")
    #[error("no road: {code}")]
    NoRoad { code: String },

    /// Response could not be parsed
    #[error("malformed response: {message}")]
    Malformed { message: String },
}
