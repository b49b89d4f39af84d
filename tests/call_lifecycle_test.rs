//! Call signaling lifecycle tests

use chrono::Utc;
use lynix::domain::call::{Call, CallStatus};
use lynix::DomainError;

fn ringing_call(caller: &str, callee: &str) -> Call {
    Call {
        id: 1,
        caller_id: caller.to_string(),
        callee_id: callee.to_string(),
        caller_username: Some(caller.to_string()),
        callee_username: Some(callee.to_string()),
        status: CallStatus::Ringing,
        created_at: Utc::now(),
        answered_at: None,
        ended_at: None,
    }
}

#[test]
fn test_answered_call_lifecycle() {
    let mut call = ringing_call("alice", "bob");

    call.transition(CallStatus::Active).expect("answer failed");
    assert_eq!(call.status, CallStatus::Active);
    assert!(call.answered_at.is_some());
    assert!(!call.is_terminal());

    call.transition(CallStatus::Ended).expect("hangup failed");
    assert_eq!(call.status, CallStatus::Ended);
    assert!(call.ended_at.is_some());
    assert!(call.is_terminal());
    assert!(call.ended_at.unwrap() >= call.answered_at.unwrap());
}

#[test]
fn test_declined_call_lifecycle() {
    let mut call = ringing_call("alice", "bob");

    call.transition(CallStatus::Declined).expect("decline failed");
    assert!(call.is_terminal());
    assert!(call.answered_at.is_none());
    assert!(call.ended_at.is_none());
}

#[test]
fn test_every_illegal_transition_is_rejected() {
    let statuses = [
        CallStatus::Ringing,
        CallStatus::Active,
        CallStatus::Declined,
        CallStatus::Ended,
    ];

    let legal = [
        (CallStatus::Ringing, CallStatus::Active),
        (CallStatus::Ringing, CallStatus::Declined),
        (CallStatus::Active, CallStatus::Ended),
    ];

    for from in statuses {
        for to in statuses {
            let mut call = ringing_call("alice", "bob");
            call.status = from;

            let result = call.transition(to);
            if legal.contains(&(from, to)) {
                assert!(result.is_ok(), "{from:?} -> {to:?} should be legal");
            } else {
                assert!(
                    matches!(result, Err(DomainError::InvalidStateTransition(_))),
                    "{from:?} -> {to:?} should be rejected"
                );
                // Rejected transitions must not mutate the call
                assert_eq!(call.status, from);
            }
        }
    }
}

#[test]
fn test_status_wire_format_is_lowercase() {
    assert_eq!(
        serde_json::to_string(&CallStatus::Ringing).unwrap(),
        "\"ringing\""
    );
    assert_eq!(
        serde_json::from_str::<CallStatus>("\"declined\"").unwrap(),
        CallStatus::Declined
    );
    assert!(serde_json::from_str::<CallStatus>("\"Ringing\"").is_err());
}

#[test]
fn test_party_membership() {
    let call = ringing_call("alice", "bob");
    assert!(call.involves("alice"));
    assert!(call.involves("bob"));
    assert!(!call.involves("mallory"));
}
