//! Slot and zone value types.

use serde::{Deserialize, Serialize};

use crate::Tick;

/// Zone-namespaced slot identifier.
pub type SlotId = u32;

/// Dense zone identifier, assigned in creation order starting at 0.
pub type ZoneId = u32;

/// Occupancy status of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotStatus {
    Free,
    /// Reserved for a request that has not arrived yet.
    Allocated,
    Occupied,
}

/// A single unit of allocatable capacity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    id: SlotId,
    zone_id: ZoneId,
    status: SlotStatus,
    /// Tick at which the slot became occupied; `None` unless `Occupied`.
    occupied_since: Option<Tick>,
}

impl Slot {
    pub fn new(id: SlotId, zone_id: ZoneId) -> Self {
        Self {
            id,
            zone_id,
            status: SlotStatus::Free,
            occupied_since: None,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn zone_id(&self) -> ZoneId {
        self.zone_id
    }

    pub fn status(&self) -> SlotStatus {
        self.status
    }

    pub fn occupied_since(&self) -> Option<Tick> {
        self.occupied_since
    }

    pub fn is_free(&self) -> bool {
        self.status == SlotStatus::Free
    }

    pub(crate) fn allocate(&mut self) {
        debug_assert_eq!(self.status, SlotStatus::Free, "allocate on non-free slot");
        self.status = SlotStatus::Allocated;
    }

    pub(crate) fn occupy(&mut self, tick: Tick) {
        debug_assert_eq!(self.status, SlotStatus::Allocated, "occupy on unallocated slot");
        self.status = SlotStatus::Occupied;
        self.occupied_since = Some(tick);
    }

    pub(crate) fn release(&mut self) {
        self.status = SlotStatus::Free;
        self.occupied_since = None;
    }
}

/// A partition of the slot pool. Owns its slots in creation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Zone {
    id: ZoneId,
    slots: Vec<Slot>,
}

impl Zone {
    pub fn new(id: ZoneId) -> Self {
        Self {
            id,
            slots: Vec::new(),
        }
    }

    pub fn id(&self) -> ZoneId {
        self.id
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn total_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_free()).count()
    }

    /// Number of slots that are `Allocated` or `Occupied`.
    pub fn in_use_count(&self) -> usize {
        self.total_slots() - self.free_count()
    }

    /// Ids of all free slots, ascending.
    pub fn free_slot_ids(&self) -> Vec<SlotId> {
        self.slots
            .iter()
            .filter(|s| s.is_free())
            .map(Slot::id)
            .collect()
    }

    pub(crate) fn push_slot(&mut self, slot: Slot) -> usize {
        self.slots.push(slot);
        self.slots.len() - 1
    }

    pub(crate) fn slot_mut(&mut self, position: usize) -> Option<&mut Slot> {
        self.slots.get_mut(position)
    }
}
