//! Tests for the request ledger.

use super::*;

use crate::error::{EngineError, Missing};

#[test]
fn test_ids_are_dense_from_one() {
    let mut ledger = RequestLedger::default();
    assert_eq!(ledger.create("A", 0, 1), 1);
    assert_eq!(ledger.create("B", 0, 2), 2);
    assert_eq!(ledger.create("A", 1, 3), 3);
    assert_eq!(ledger.len(), 3);
    assert_eq!(ledger.get(2).unwrap().vehicle_id(), "B");
}

#[test]
fn test_get_rejects_zero_and_unknown_ids() {
    let mut ledger = RequestLedger::default();
    ledger.create("A", 0, 1);
    assert!(ledger.get(0).is_none());
    assert!(ledger.get(2).is_none());
    assert_eq!(
        ledger.require(9).unwrap_err(),
        EngineError::NotFound(Missing::Request(9))
    );
}

#[test]
fn test_by_vehicle_preserves_creation_order() {
    let mut ledger = RequestLedger::default();
    ledger.create("A", 0, 1);
    ledger.create("B", 0, 2);
    ledger.create("A", 1, 3);
    let ids: Vec<_> = ledger.by_vehicle("A").map(|r| r.id()).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(ledger.by_vehicle("A").next_back().unwrap().id(), 3);
    assert_eq!(ledger.by_vehicle("Z").count(), 0);
}

#[test]
fn test_replace_overwrites_in_place() {
    let mut ledger = RequestLedger::default();
    let id = ledger.create("A", 0, 1);
    ledger.require_mut(id).unwrap().cancel().unwrap();

    let fresh = ParkingRequest::new(id, "A", 0, 8);
    ledger.replace(fresh.clone()).unwrap();
    assert_eq!(ledger.get(id), Some(&fresh));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_replace_unknown_id_fails() {
    let mut ledger = RequestLedger::default();
    let err = ledger.replace(ParkingRequest::new(4, "A", 0, 1)).unwrap_err();
    assert_eq!(err, EngineError::NotFound(Missing::Request(4)));
}
