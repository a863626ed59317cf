//! Tests for zone/slot bookkeeping and the id index.

use super::*;

use crate::error::{EngineError, Missing};

fn registry_with(zones: u32, slots_per_zone: u32) -> SlotRegistry {
    let mut registry = SlotRegistry::default();
    for _ in 0..zones {
        let zone = registry.add_zone();
        if slots_per_zone > 0 {
            registry.add_slots(zone, slots_per_zone).unwrap();
        }
    }
    registry
}

// -------------------------------------------------------------------------
// Zone and id allocation
// -------------------------------------------------------------------------

#[test]
fn test_zone_ids_are_dense() {
    let mut registry = SlotRegistry::default();
    assert_eq!(registry.add_zone(), 0);
    assert_eq!(registry.add_zone(), 1);
    assert_eq!(registry.add_zone(), 2);
    assert_eq!(registry.zone_count(), 3);
}

#[test]
fn test_slot_ids_are_zone_namespaced() {
    let registry = registry_with(3, 2);
    assert_eq!(registry.zone(0).unwrap().free_slot_ids(), vec![0, 1]);
    assert_eq!(registry.zone(1).unwrap().free_slot_ids(), vec![1000, 1001]);
    assert_eq!(registry.zone(2).unwrap().free_slot_ids(), vec![2000, 2001]);
}

#[test]
fn test_slot_ids_continue_after_repeated_adds() {
    let mut registry = registry_with(2, 2);
    let added = registry.add_slots(1, 3).unwrap();
    assert_eq!(added, vec![1002, 1003, 1004]);
    assert_eq!(registry.zone(1).unwrap().total_slots(), 5);
    assert_eq!(registry.total_slots(), 7);
}

#[test]
fn test_add_slots_zero_count_rejected() {
    let mut registry = registry_with(1, 0);
    let err = registry.add_slots(0, 0).unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
    assert_eq!(registry.total_slots(), 0);
}

#[test]
fn test_add_slots_unknown_zone() {
    let mut registry = registry_with(1, 0);
    let err = registry.add_slots(4, 1).unwrap_err();
    assert_eq!(err, EngineError::NotFound(Missing::Zone(4)));
}

#[test]
fn test_add_slots_beyond_stride_rejected_without_mutation() {
    let mut registry = SlotRegistry::new(4);
    let zone = registry.add_zone();
    registry.add_slots(zone, 3).unwrap();
    let err = registry.add_slots(zone, 2).unwrap_err();
    assert!(matches!(err, EngineError::InvalidArgument(_)));
    assert_eq!(registry.zone(zone).unwrap().total_slots(), 3);
    registry.add_slots(zone, 1).unwrap();
    assert_eq!(registry.zone(zone).unwrap().total_slots(), 4);
}

// -------------------------------------------------------------------------
// Lookup and status mutation
// -------------------------------------------------------------------------

#[test]
fn test_find_by_id_resolves_zone_and_position() {
    let registry = registry_with(2, 3);
    let slot = registry.find_by_id(1002).expect("slot 1002 exists");
    assert_eq!(slot.id(), 1002);
    assert_eq!(slot.zone_id(), 1);
    assert!(slot.is_free());
    assert!(registry.find_by_id(3).is_none());
    assert!(registry.find_by_id(5000).is_none());
}

#[test]
fn test_status_cycle_keeps_free_enumeration_consistent() {
    let mut registry = registry_with(1, 3);
    registry.allocate(1).unwrap();
    assert_eq!(registry.status_of(1), Some(SlotStatus::Allocated));
    assert_eq!(registry.free_slot_ids(0).unwrap(), vec![0, 2]);
    assert_eq!(registry.free_count_of(0).unwrap(), 2);

    registry.occupy(1, 9).unwrap();
    let slot = registry.find_by_id(1).unwrap();
    assert_eq!(slot.status(), SlotStatus::Occupied);
    assert_eq!(slot.occupied_since(), Some(9));

    registry.release(1).unwrap();
    let slot = registry.find_by_id(1).unwrap();
    assert!(slot.is_free());
    assert_eq!(slot.occupied_since(), None);
    assert_eq!(registry.free_slot_ids(0).unwrap(), vec![0, 1, 2]);
}

#[test]
fn test_mutators_report_unknown_slot() {
    let mut registry = registry_with(1, 1);
    assert_eq!(
        registry.allocate(77).unwrap_err(),
        EngineError::NotFound(Missing::Slot(77))
    );
    assert_eq!(
        registry.release(77).unwrap_err(),
        EngineError::NotFound(Missing::Slot(77))
    );
}

#[test]
fn test_conservation_per_zone() {
    let mut registry = registry_with(2, 4);
    registry.allocate(0).unwrap();
    registry.allocate(1001).unwrap();
    registry.occupy(1001, 3).unwrap();
    for zone in registry.zones() {
        assert_eq!(zone.free_count() + zone.in_use_count(), zone.total_slots());
    }
    assert_eq!(registry.free_count_of(0).unwrap(), 3);
    assert_eq!(registry.free_count_of(1).unwrap(), 3);
    assert!(registry.free_count_of(2).is_err());
}
