//! Call value objects

use serde::{Deserialize, Serialize};

/// Call signaling status
///
/// The status field is persisted as a lowercase string; the enum keeps
/// the legal-transition table in one place so that handlers cannot
/// write arbitrary statuses over each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Callee is being alerted
    Ringing,
    /// Call has been answered
    Active,
    /// Callee rejected the call
    Declined,
    /// Call finished after being active
    Ended,
}

impl CallStatus {
    /// Check if a state transition is valid
    pub fn can_transition_to(&self, new_status: CallStatus) -> bool {
        use CallStatus::*;

        matches!(
            (self, new_status),
            (Ringing, Active) | (Ringing, Declined) | (Active, Ended)
        )
    }

    /// Terminal statuses never leave `status` query results hanging:
    /// a call in one of these is no longer "the current call" for
    /// either party.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CallStatus::Declined | CallStatus::Ended)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Ringing => "ringing",
            CallStatus::Active => "active",
            CallStatus::Declined => "declined",
            CallStatus::Ended => "ended",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ringing" => Some(CallStatus::Ringing),
            "active" => Some(CallStatus::Active),
            "declined" => Some(CallStatus::Declined),
            "ended" => Some(CallStatus::Ended),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(CallStatus::Ringing.can_transition_to(CallStatus::Active));
        assert!(CallStatus::Ringing.can_transition_to(CallStatus::Declined));
        assert!(CallStatus::Active.can_transition_to(CallStatus::Ended));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!CallStatus::Ringing.can_transition_to(CallStatus::Ended));
        assert!(!CallStatus::Active.can_transition_to(CallStatus::Ringing));
        assert!(!CallStatus::Active.can_transition_to(CallStatus::Declined));
        assert!(!CallStatus::Declined.can_transition_to(CallStatus::Active));
        assert!(!CallStatus::Ended.can_transition_to(CallStatus::Ringing));
        assert!(!CallStatus::Ringing.can_transition_to(CallStatus::Ringing));
    }

    #[test]
    fn test_is_terminal() {
        assert!(!CallStatus::Ringing.is_terminal());
        assert!(!CallStatus::Active.is_terminal());
        assert!(CallStatus::Declined.is_terminal());
        assert!(CallStatus::Ended.is_terminal());
    }

    #[test]
    fn test_string_round_trip() {
        for status in [
            CallStatus::Ringing,
            CallStatus::Active,
            CallStatus::Declined,
            CallStatus::Ended,
        ] {
            assert_eq!(CallStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CallStatus::parse("held"), None);
    }
}
