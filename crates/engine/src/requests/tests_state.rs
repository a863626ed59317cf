//! Tests for the request state machine.

use super::*;

use crate::error::EngineError;

static ALL_STATES: [RequestState; 5] = [
    RequestState::Requested,
    RequestState::Allocated,
    RequestState::Occupied,
    RequestState::Released,
    RequestState::Cancelled,
];

fn assignment() -> SlotAssignment {
    SlotAssignment {
        slot_id: 1003,
        zone_id: 1,
    }
}

// -------------------------------------------------------------------------
// Edge table
// -------------------------------------------------------------------------

#[test]
fn test_exactly_five_legal_edges() {
    let legal: Vec<_> = ALL_STATES
        .iter()
        .flat_map(|&from| ALL_STATES.iter().map(move |&to| (from, to)))
        .filter(|&(from, to)| from.can_transition(to))
        .collect();
    assert_eq!(
        legal,
        vec![
            (RequestState::Requested, RequestState::Allocated),
            (RequestState::Requested, RequestState::Cancelled),
            (RequestState::Allocated, RequestState::Occupied),
            (RequestState::Allocated, RequestState::Cancelled),
            (RequestState::Occupied, RequestState::Released),
        ]
    );
}

#[test]
fn test_terminal_states_have_no_exit() {
    for from in [RequestState::Released, RequestState::Cancelled] {
        assert!(from.is_terminal());
        for to in ALL_STATES {
            assert!(!from.can_transition(to), "{from:?} -> {to:?} must be illegal");
        }
    }
}

// -------------------------------------------------------------------------
// Tick bookkeeping
// -------------------------------------------------------------------------

#[test]
fn test_full_lifecycle_ticks_and_duration() {
    let mut request = ParkingRequest::new(1, "V1", 1, 10);
    assert_eq!(request.state(), RequestState::Requested);
    assert_eq!(request.request_tick(), 10);

    request.allocate(assignment(), 5.0, 10).unwrap();
    assert_eq!(request.start_tick(), Some(10));
    assert_eq!(request.slot_id(), Some(1003));
    assert_eq!(request.penalty(), 5.0);

    request.occupy(12).unwrap();
    assert_eq!(request.start_tick(), Some(12), "occupancy supersedes allocation tick");
    assert_eq!(request.duration_ticks(), None);

    let held = request.release(17).unwrap();
    assert_eq!(held, Some(assignment()));
    assert_eq!(request.state(), RequestState::Released);
    assert_eq!(request.end_tick(), Some(17));
    assert_eq!(request.duration_ticks(), Some(5));
    assert_eq!(request.assignment(), None);
    assert_eq!(request.penalty(), 5.0, "penalty stays for billing");
}

#[test]
fn test_cancel_from_requested_holds_nothing() {
    let mut request = ParkingRequest::new(2, "V2", 0, 1);
    assert_eq!(request.cancel().unwrap(), None);
    assert_eq!(request.state(), RequestState::Cancelled);
    assert_eq!(request.duration_ticks(), None);
}

#[test]
fn test_cancel_from_allocated_returns_slot() {
    let mut request = ParkingRequest::new(3, "V3", 1, 1);
    request.allocate(assignment(), 0.0, 2).unwrap();
    assert_eq!(request.cancel().unwrap(), Some(assignment()));
    assert!(!request.state().holds_slot());
    assert_eq!(request.slot_id(), None);
}

#[test]
fn test_invalid_transition_leaves_request_unchanged() {
    let mut request = ParkingRequest::new(4, "V4", 0, 1);
    let before = request.clone();

    let err = request.occupy(3).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidTransition {
            request_id: 4,
            from: RequestState::Requested,
            to: RequestState::Occupied,
        }
    );
    assert!(request.release(3).is_err());
    assert_eq!(request, before);
}

#[test]
fn test_occupied_cannot_be_cancelled() {
    let mut request = ParkingRequest::new(5, "V5", 1, 1);
    request.allocate(assignment(), 0.0, 1).unwrap();
    request.occupy(2).unwrap();
    assert!(matches!(
        request.cancel(),
        Err(EngineError::InvalidTransition { .. })
    ));
    assert_eq!(request.state(), RequestState::Occupied);
    assert_eq!(request.slot_id(), Some(1003));
}

#[test]
fn test_reset_keeps_identity_and_clears_everything_else() {
    let mut request = ParkingRequest::new(6, "V6", 2, 1);
    request.allocate(assignment(), 5.0, 3).unwrap();

    let fresh = request.reset(9);
    assert_eq!(fresh.id(), 6);
    assert_eq!(fresh.vehicle_id(), "V6");
    assert_eq!(fresh.requested_zone(), 2);
    assert_eq!(fresh.state(), RequestState::Requested);
    assert_eq!(fresh.request_tick(), 9);
    assert_eq!(fresh.assignment(), None);
    assert_eq!(fresh.penalty(), 0.0);
    assert_eq!(fresh.start_tick(), None);
}
