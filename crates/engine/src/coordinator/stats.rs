//! Read-only accessors for dashboards and statistics.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::requests::{ParkingRequest, RequestId, RequestState};
use crate::slots::{Slot, SlotId, ZoneId};
use crate::Tick;

use super::system::ParkingSystem;

/// One row of the request roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub request_id: RequestId,
    pub vehicle_id: String,
    pub state: RequestState,
    pub slot_id: Option<SlotId>,
}

/// Free/total capacity of one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub zone_id: ZoneId,
    pub free: usize,
    pub total: usize,
    pub free_slot_ids: Vec<SlotId>,
}

/// Point-in-time view of the whole system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub tick: Tick,
    pub rate_per_tick: f64,
    pub total_revenue: f64,
    pub zones: Vec<ZoneSummary>,
    pub requests: Vec<RosterEntry>,
    pub pending: usize,
    pub rollback_depth: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub average_duration_ticks: f64,
}

impl ParkingSystem {
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    pub fn zone_count(&self) -> usize {
        self.slots.zone_count()
    }

    /// `(zone_id, free_count)` for every zone.
    pub fn zone_free_counts(&self) -> Vec<(ZoneId, usize)> {
        self.slots
            .zones()
            .iter()
            .map(|zone| (zone.id(), zone.free_count()))
            .collect()
    }

    pub fn free_count(&self, zone_id: ZoneId) -> Result<usize, EngineError> {
        self.slots.free_count_of(zone_id)
    }

    pub fn free_slot_ids(&self, zone_id: ZoneId) -> Result<Vec<SlotId>, EngineError> {
        self.slots.free_slot_ids(zone_id)
    }

    pub fn slot(&self, slot_id: SlotId) -> Option<&Slot> {
        self.slots.find_by_id(slot_id)
    }

    pub fn request(&self, request_id: RequestId) -> Option<&ParkingRequest> {
        self.ledger.get(request_id)
    }

    pub fn requests(&self) -> impl Iterator<Item = &ParkingRequest> {
        self.ledger.iter()
    }

    pub fn roster(&self) -> Vec<RosterEntry> {
        self.ledger
            .iter()
            .map(|r| RosterEntry {
                request_id: r.id(),
                vehicle_id: r.vehicle_id().to_string(),
                state: r.state(),
                slot_id: r.slot_id(),
            })
            .collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Queued request ids, front first.
    pub fn pending_ids(&self) -> Vec<RequestId> {
        self.pending.iter().collect()
    }

    pub fn rollback_depth(&self) -> usize {
        self.journal.len()
    }

    pub fn completed_count(&self) -> usize {
        self.count_in(RequestState::Released)
    }

    pub fn cancelled_count(&self) -> usize {
        self.count_in(RequestState::Cancelled)
    }

    /// Mean occupancy of released requests, `0.0` when none completed.
    pub fn average_completed_duration(&self) -> f64 {
        let (total, count) = self
            .ledger
            .iter()
            .filter_map(ParkingRequest::duration_ticks)
            .fold((0u64, 0u64), |(total, count), d| (total + d, count + 1));
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            tick: self.tick,
            rate_per_tick: self.config.rate_per_tick,
            total_revenue: self.total_revenue,
            zones: self
                .slots
                .zones()
                .iter()
                .map(|zone| ZoneSummary {
                    zone_id: zone.id(),
                    free: zone.free_count(),
                    total: zone.total_slots(),
                    free_slot_ids: zone.free_slot_ids(),
                })
                .collect(),
            requests: self.roster(),
            pending: self.pending.len(),
            rollback_depth: self.journal.len(),
            completed: self.completed_count(),
            cancelled: self.cancelled_count(),
            average_duration_ticks: self.average_completed_duration(),
        }
    }

    fn count_in(&self, state: RequestState) -> usize {
        self.ledger.iter().filter(|r| r.state() == state).count()
    }
}
