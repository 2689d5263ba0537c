//! Permission and location collaborators.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use crate::domain::Position;

/// Answer to a location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Denied,
}

/// Error from a location provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Asks the user (or platform) for location permission.
pub trait PermissionGate: Send + Sync {
    fn request(&self) -> BoxFuture<'_, Permission>;
}

/// Supplies the device's last known position, if it has one.
pub trait LocationProvider: Send + Sync {
    fn last_known(&self) -> BoxFuture<'_, Result<Option<Position>, LocationError>>;
}

/// A permission answer already obtained elsewhere, e.g. by the browser.
#[derive(Debug, Clone, Copy)]
pub struct ReportedPermission(pub Permission);

impl PermissionGate for ReportedPermission {
    fn request(&self) -> BoxFuture<'_, Permission> {
        let answer = self.0;
        Box::pin(async move { answer })
    }
}

/// A reading already taken elsewhere; `None` when the device had none.
#[derive(Debug, Clone, Copy)]
pub struct ReportedLocation(pub Option<Position>);

impl LocationProvider for ReportedLocation {
    fn last_known(&self) -> BoxFuture<'_, Result<Option<Position>, LocationError>> {
        let reading = self.0;
        Box::pin(async move { Ok(reading) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reported_values_pass_through() {
        assert_eq!(
            ReportedPermission(Permission::Denied).request().await,
            Permission::Denied
        );

        let p = Position::new(49.6, 6.1).unwrap();
        assert_eq!(ReportedLocation(Some(p)).last_known().await, Ok(Some(p)));
        assert_eq!(ReportedLocation(None).last_known().await, Ok(None));
    }

    #[test]
    fn permission_wire_form() {
        let p: Permission = serde_json::from_str("\"granted\"").unwrap();
        assert_eq!(p, Permission::Granted);
    }
}
