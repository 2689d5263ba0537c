//! The location flow as a state machine.

use serde::Serialize;

/// Where the device location flow currently stands.
///
/// ```text
/// Unrequested -> PermissionPending -> PermissionDenied
///                                  -> PermissionGranted -> LocationUnknown
///                                                       -> LocationKnown
/// ```
///
/// A new request may start from any settled state (the "use my location"
/// button), but not while a permission prompt or location query is in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationState {
    #[default]
    Unrequested,
    PermissionPending,
    PermissionDenied,
    PermissionGranted,
    LocationUnknown,
    LocationKnown,
}

/// Inputs that drive [`LocationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationEvent {
    /// Permission was requested.
    Requested,
    Granted,
    Denied,
    /// The last-known query returned a reading.
    Fixed,
    /// The last-known query returned nothing or failed.
    NoFix,
    /// The request stopped before an answer came back.
    Abandoned,
}

/// Error returned for an event that is not valid in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("event {event:?} is not valid in state {state:?}")]
pub struct InvalidTransition {
    pub state: LocationState,
    pub event: LocationEvent,
}

impl LocationState {
    /// Apply an event, returning the next state.
    pub fn apply(self, event: LocationEvent) -> Result<Self, InvalidTransition> {
        use self::LocationEvent as E;
        use self::LocationState as S;

        match (self, event) {
            (S::PermissionPending | S::PermissionGranted, E::Requested) => {
                Err(InvalidTransition { state: self, event })
            }
            (_, E::Requested) => Ok(S::PermissionPending),
            (S::PermissionPending, E::Granted) => Ok(S::PermissionGranted),
            (S::PermissionPending, E::Denied) => Ok(S::PermissionDenied),
            (S::PermissionGranted, E::Fixed) => Ok(S::LocationKnown),
            (S::PermissionGranted, E::NoFix) => Ok(S::LocationUnknown),
            (S::PermissionPending | S::PermissionGranted, E::Abandoned) => Ok(S::LocationUnknown),
            _ => Err(InvalidTransition { state: self, event }),
        }
    }

    /// True while a permission prompt or location query is outstanding.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::PermissionPending | Self::PermissionGranted)
    }
}

#[cfg(test)]
mod tests {
    use super::LocationEvent as E;
    use super::LocationState as S;

    #[test]
    fn happy_path() {
        let s = S::Unrequested.apply(E::Requested).unwrap();
        assert_eq!(s, S::PermissionPending);
        let s = s.apply(E::Granted).unwrap();
        assert_eq!(s, S::PermissionGranted);
        let s = s.apply(E::Fixed).unwrap();
        assert_eq!(s, S::LocationKnown);
    }

    #[test]
    fn denied_path() {
        let s = S::Unrequested
            .apply(E::Requested)
            .and_then(|s| s.apply(E::Denied))
            .unwrap();
        assert_eq!(s, S::PermissionDenied);
    }

    #[test]
    fn null_reading() {
        let s = S::PermissionGranted.apply(E::NoFix).unwrap();
        assert_eq!(s, S::LocationUnknown);
    }

    #[test]
    fn settled_states_can_request_again() {
        for s in [
            S::Unrequested,
            S::PermissionDenied,
            S::LocationUnknown,
            S::LocationKnown,
        ] {
            assert_eq!(s.apply(E::Requested), Ok(S::PermissionPending));
        }
    }

    #[test]
    fn in_flight_rejects_new_request() {
        assert!(S::PermissionPending.apply(E::Requested).is_err());
        assert!(S::PermissionGranted.apply(E::Requested).is_err());
        assert!(S::PermissionPending.is_in_flight());
        assert!(!S::LocationKnown.is_in_flight());
    }

    #[test]
    fn abandoned_request_settles() {
        assert_eq!(S::PermissionPending.apply(E::Abandoned), Ok(S::LocationUnknown));
        assert_eq!(S::PermissionGranted.apply(E::Abandoned), Ok(S::LocationUnknown));
        assert!(S::LocationKnown.apply(E::Abandoned).is_err());
    }

    #[test]
    fn out_of_order_events_rejected() {
        assert!(S::Unrequested.apply(E::Granted).is_err());
        assert!(S::PermissionDenied.apply(E::Fixed).is_err());
        assert!(S::PermissionPending.apply(E::Fixed).is_err());
        assert!(S::LocationKnown.apply(E::Denied).is_err());

        let err = S::Unrequested.apply(E::NoFix).unwrap_err();
        assert_eq!(
            err.to_string(),
            "event NoFix is not valid in state Unrequested"
        );
    }
}
