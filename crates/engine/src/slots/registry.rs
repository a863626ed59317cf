//! Zone-owned slot storage with an ordered id index.

use std::collections::BTreeMap;

use crate::config::SLOT_ID_STRIDE;
use crate::error::{EngineError, Missing};
use crate::Tick;

use super::types::{Slot, SlotId, SlotStatus, Zone, ZoneId};

/// Where a slot lives inside the registry: zone vector index + position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotLocation {
    zone: usize,
    position: usize,
}

/// Owns every zone and slot in the system.
#[derive(Debug, Clone)]
pub struct SlotRegistry {
    zones: Vec<Zone>,
    index: BTreeMap<SlotId, SlotLocation>,
    stride: u32,
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new(SLOT_ID_STRIDE)
    }
}

impl SlotRegistry {
    pub fn new(stride: u32) -> Self {
        Self {
            zones: Vec::new(),
            index: BTreeMap::new(),
            stride,
        }
    }

    /// Append an empty zone and return its id.
    pub fn add_zone(&mut self) -> ZoneId {
        let id = self.zones.len() as ZoneId;
        self.zones.push(Zone::new(id));
        id
    }

    /// Append `count` free slots to `zone_id`, returning the new slot ids.
    pub fn add_slots(&mut self, zone_id: ZoneId, count: u32) -> Result<Vec<SlotId>, EngineError> {
        if count == 0 {
            return Err(EngineError::InvalidArgument(
                "slot count must be positive".to_string(),
            ));
        }
        let zone_idx = zone_id as usize;
        let existing = self
            .zones
            .get(zone_idx)
            .ok_or(EngineError::NotFound(Missing::Zone(zone_id)))?
            .total_slots();
        let new_total = existing as u64 + count as u64;
        if new_total > self.stride as u64 {
            return Err(EngineError::InvalidArgument(format!(
                "zone {zone_id} would hold {new_total} slots, limit is {}",
                self.stride
            )));
        }
        let base = zone_id as u64 * self.stride as u64;
        if base + new_total > SlotId::MAX as u64 {
            return Err(EngineError::InvalidArgument(format!(
                "slot ids for zone {zone_id} exceed the id range"
            )));
        }

        let zone = &mut self.zones[zone_idx];
        let mut added = Vec::with_capacity(count as usize);
        for offset in 0..count as usize {
            let id = (base + (existing + offset) as u64) as SlotId;
            let position = zone.push_slot(Slot::new(id, zone_id));
            self.index.insert(
                id,
                SlotLocation {
                    zone: zone_idx,
                    position,
                },
            );
            added.push(id);
        }
        Ok(added)
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone(&self, zone_id: ZoneId) -> Option<&Zone> {
        self.zones.get(zone_id as usize)
    }

    pub fn has_zone(&self, zone_id: ZoneId) -> bool {
        (zone_id as usize) < self.zones.len()
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// O(log n) lookup through the ordered index.
    pub fn find_by_id(&self, slot_id: SlotId) -> Option<&Slot> {
        let loc = self.index.get(&slot_id)?;
        self.zones.get(loc.zone)?.slots().get(loc.position)
    }

    pub fn free_count_of(&self, zone_id: ZoneId) -> Result<usize, EngineError> {
        self.zone(zone_id)
            .map(Zone::free_count)
            .ok_or(EngineError::NotFound(Missing::Zone(zone_id)))
    }

    pub fn free_slot_ids(&self, zone_id: ZoneId) -> Result<Vec<SlotId>, EngineError> {
        self.zone(zone_id)
            .map(Zone::free_slot_ids)
            .ok_or(EngineError::NotFound(Missing::Zone(zone_id)))
    }

    /// Total number of slots across all zones.
    pub fn total_slots(&self) -> usize {
        self.index.len()
    }

    /// `Free -> Allocated`. The prior status is the caller's responsibility.
    pub fn allocate(&mut self, slot_id: SlotId) -> Result<(), EngineError> {
        self.slot_mut(slot_id)?.allocate();
        Ok(())
    }

    /// `Allocated -> Occupied`, stamping the occupancy tick.
    pub fn occupy(&mut self, slot_id: SlotId, tick: Tick) -> Result<(), EngineError> {
        self.slot_mut(slot_id)?.occupy(tick);
        Ok(())
    }

    /// Back to `Free` from either held status.
    pub fn release(&mut self, slot_id: SlotId) -> Result<(), EngineError> {
        self.slot_mut(slot_id)?.release();
        Ok(())
    }

    /// Status of a slot, if it exists.
    pub fn status_of(&self, slot_id: SlotId) -> Option<SlotStatus> {
        self.find_by_id(slot_id).map(Slot::status)
    }

    fn slot_mut(&mut self, slot_id: SlotId) -> Result<&mut Slot, EngineError> {
        let loc = *self
            .index
            .get(&slot_id)
            .ok_or(EngineError::NotFound(Missing::Slot(slot_id)))?;
        self.zones
            .get_mut(loc.zone)
            .and_then(|zone| zone.slot_mut(loc.position))
            .ok_or(EngineError::NotFound(Missing::Slot(slot_id)))
    }
}
