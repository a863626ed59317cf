//! `ParkingSystem` resource and its mutating operations.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::allocation::{select_slot, Selection};
use crate::config::EngineConfig;
use crate::error::{EngineError, Missing};
use crate::pending::PendingQueue;
use crate::requests::{RequestId, RequestLedger, RequestState, SlotAssignment};
use crate::rollback::{AllocationDecision, RollbackLog};
use crate::slots::{SlotId, SlotRegistry, ZoneId};
use crate::Tick;

/// Outcome of `entry`: the new request id, its penalty, and the slot when it
/// was served immediately (`None` means it was queued).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntryReceipt {
    pub request_id: RequestId,
    pub penalty: f64,
    pub slot: Option<SlotAssignment>,
}

/// Billing summary of a completed stay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReleaseReceipt {
    pub request_id: RequestId,
    pub slot_id: SlotId,
    pub duration_ticks: Tick,
    pub charge: f64,
}

/// Which journal entries a rollback reverted and which it only consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollbackReport {
    /// Requests reset to `Requested`, most recent allocation first.
    pub undone: Vec<RequestId>,
    /// Requests whose allocation had already ended (released, cancelled).
    pub skipped: Vec<RequestId>,
}

/// The allocation and lifecycle engine.
#[derive(Resource, Debug, Clone)]
pub struct ParkingSystem {
    pub(super) config: EngineConfig,
    pub(super) slots: SlotRegistry,
    pub(super) ledger: RequestLedger,
    pub(super) pending: PendingQueue,
    pub(super) journal: RollbackLog,
    pub(super) tick: Tick,
    pub(super) total_revenue: f64,
}

impl Default for ParkingSystem {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ParkingSystem {
    pub fn new(config: EngineConfig) -> Self {
        let mut slots = SlotRegistry::new(config.slot_id_stride);
        for _ in 0..config.initial_zones {
            slots.add_zone();
        }
        Self {
            config,
            slots,
            ledger: RequestLedger::default(),
            pending: PendingQueue::default(),
            journal: RollbackLog::default(),
            tick: 0,
            total_revenue: 0.0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Capacity
    // -----------------------------------------------------------------------

    pub fn add_zone(&mut self) -> ZoneId {
        let zone_id = self.slots.add_zone();
        info!("Added zone {}", zone_id);
        zone_id
    }

    /// Add `count` free slots to a zone. Does not replay the backlog.
    pub fn add_slots(&mut self, zone_id: ZoneId, count: u32) -> Result<Vec<SlotId>, EngineError> {
        let added = self.slots.add_slots(zone_id, count)?;
        info!("Added {} slots to zone {}", added.len(), zone_id);
        Ok(added)
    }

    // -----------------------------------------------------------------------
    // Clock
    // -----------------------------------------------------------------------

    /// Saturates at `Tick::MAX`; the clock never wraps backwards.
    fn tick(&mut self) -> Tick {
        self.tick = self.tick.saturating_add(1);
        self.tick
    }

    /// Advance the clock by `ticks` idle ticks and return the new tick.
    ///
    /// Rejects zero and any count that would overflow the clock, leaving the
    /// tick unchanged.
    pub fn advance_clock(&mut self, ticks: u64) -> Result<Tick, EngineError> {
        if ticks == 0 {
            return Err(EngineError::InvalidArgument(
                "tick count must be positive".to_string(),
            ));
        }
        let current = self.tick;
        self.tick = current.checked_add(ticks).ok_or_else(|| {
            EngineError::InvalidArgument(format!(
                "advancing {ticks} ticks from tick {current} overflows the clock"
            ))
        })?;
        Ok(self.tick)
    }

    // -----------------------------------------------------------------------
    // Request lifecycle
    // -----------------------------------------------------------------------

    /// Create a request and serve it immediately if any slot is free,
    /// otherwise queue it. Lack of capacity is not an error.
    pub fn entry(&mut self, vehicle_id: &str, requested_zone: ZoneId) -> Result<EntryReceipt, EngineError> {
        let tick = self.tick();
        if vehicle_id.trim().is_empty() {
            return Err(EngineError::InvalidArgument(
                "vehicle id must not be empty".to_string(),
            ));
        }
        if !self.slots.has_zone(requested_zone) {
            return Err(EngineError::NotFound(Missing::Zone(requested_zone)));
        }

        let request_id = self.ledger.create(vehicle_id, requested_zone, tick);
        match select_slot(requested_zone, &self.slots, self.config.cross_zone_penalty) {
            Some(selection) => {
                self.allocate_request(request_id, selection)?;
                info!(
                    "Request {} ({}) allocated slot {} in zone {} (penalty {})",
                    request_id, vehicle_id, selection.slot_id, selection.zone_id, selection.penalty
                );
                Ok(EntryReceipt {
                    request_id,
                    penalty: selection.penalty,
                    slot: Some(SlotAssignment {
                        slot_id: selection.slot_id,
                        zone_id: selection.zone_id,
                    }),
                })
            }
            None => {
                self.pending.push(request_id);
                info!(
                    "No slot available, request {} ({}) queued at position {}",
                    request_id,
                    vehicle_id,
                    self.pending.len()
                );
                Ok(EntryReceipt {
                    request_id,
                    penalty: 0.0,
                    slot: None,
                })
            }
        }
    }

    /// `Allocated -> Occupied` for the request and its slot.
    pub fn occupy(&mut self, request_id: RequestId) -> Result<(), EngineError> {
        let tick = self.tick();
        let request = self.ledger.require(request_id)?;
        request.check_transition(RequestState::Occupied)?;
        let slot_id = self.held_slot(request_id)?;

        self.slots.occupy(slot_id, tick)?;
        self.ledger.require_mut(request_id)?.occupy(tick)?;
        info!("Request {} occupied slot {}", request_id, slot_id);
        Ok(())
    }

    /// `Occupied -> Released`: bill the stay, free the slot, replay the backlog.
    pub fn release(&mut self, request_id: RequestId) -> Result<ReleaseReceipt, EngineError> {
        let tick = self.tick();
        let request = self.ledger.require(request_id)?;
        request.check_transition(RequestState::Released)?;
        let slot_id = self.held_slot(request_id)?;

        let request = self.ledger.require_mut(request_id)?;
        request.release(tick)?;
        let duration_ticks = request.duration_ticks().unwrap_or(0);
        let charge = duration_ticks as f64 * self.config.rate_per_tick + request.penalty();
        self.total_revenue += charge;
        self.slots.release(slot_id)?;
        info!(
            "Released request {} from slot {}: {} ticks, charge {}",
            request_id, slot_id, duration_ticks, charge
        );

        self.drain_pending();
        Ok(ReleaseReceipt {
            request_id,
            slot_id,
            duration_ticks,
            charge,
        })
    }

    /// Release the vehicle's most recent request that holds a slot.
    pub fn exit_by_vehicle(&mut self, vehicle_id: &str) -> Result<ReleaseReceipt, EngineError> {
        let request_id = self
            .ledger
            .by_vehicle(vehicle_id)
            .rev()
            .find(|r| r.state().holds_slot())
            .map(|r| r.id())
            .ok_or_else(|| EngineError::NotFound(Missing::Vehicle(vehicle_id.to_string())))?;
        self.release(request_id)
    }

    /// `{Requested, Allocated} -> Cancelled`. Returns the freed slot, if any.
    pub fn cancel(&mut self, request_id: RequestId) -> Result<Option<SlotId>, EngineError> {
        self.tick();
        let request = self.ledger.require(request_id)?;
        request.check_transition(RequestState::Cancelled)?;
        let held = request.slot_id();
        if let Some(slot_id) = held {
            if self.slots.find_by_id(slot_id).is_none() {
                return Err(EngineError::NotFound(Missing::Slot(slot_id)));
            }
        }

        self.ledger.require_mut(request_id)?.cancel()?;
        self.pending.remove(request_id);
        info!("Cancelled request {}", request_id);

        if let Some(slot_id) = held {
            self.slots.release(slot_id)?;
            self.drain_pending();
        }
        Ok(held)
    }

    /// Undo the `k` most recent allocations, most recent first.
    ///
    /// Fails without mutation when `k == 0` or the journal holds fewer than
    /// `k` entries. An entry whose request no longer holds the journaled slot
    /// (released or cancelled since) is consumed and reported as skipped.
    /// Reverted requests are reset to `Requested`, the backlog is replayed
    /// against the freed slots, and then the reverted requests join the back
    /// of the backlog.
    pub fn rollback_last(&mut self, k: usize) -> Result<RollbackReport, EngineError> {
        let tick = self.tick();
        let decisions = self.journal.take_last(k)?;

        let mut report = RollbackReport::default();
        for decision in decisions {
            let Some(request) = self.ledger.get(decision.request_id) else {
                debug!(
                    "Rollback skipped unknown request {}",
                    decision.request_id
                );
                report.skipped.push(decision.request_id);
                continue;
            };
            if !request.state().holds_slot() || request.slot_id() != Some(decision.slot_id) {
                debug!(
                    "Rollback skipped request {} in state {:?}",
                    decision.request_id,
                    request.state()
                );
                report.skipped.push(decision.request_id);
                continue;
            }

            let fresh = request.reset(tick);
            self.slots.release(decision.slot_id)?;
            self.ledger.replace(fresh)?;
            report.undone.push(decision.request_id);
        }

        info!(
            "Rolled back {} allocations ({} undone, {} skipped)",
            k,
            report.undone.len(),
            report.skipped.len()
        );

        if !report.undone.is_empty() {
            self.drain_pending();
        }
        for &request_id in &report.undone {
            self.pending.push(request_id);
        }
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// The vehicle's most recent non-terminal request, or failing that its
    /// most recent request of any state.
    pub fn search(&self, vehicle_id: &str) -> Result<RequestId, EngineError> {
        self.ledger
            .by_vehicle(vehicle_id)
            .rev()
            .find(|r| !r.state().is_terminal())
            .or_else(|| self.ledger.by_vehicle(vehicle_id).next_back())
            .map(|r| r.id())
            .ok_or_else(|| EngineError::NotFound(Missing::Vehicle(vehicle_id.to_string())))
    }

    /// Every request id the vehicle has generated, in creation order.
    pub fn search_history(&self, vehicle_id: &str) -> Vec<RequestId> {
        self.ledger.by_vehicle(vehicle_id).map(|r| r.id()).collect()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn held_slot(&self, request_id: RequestId) -> Result<SlotId, EngineError> {
        let slot_id = self
            .ledger
            .require(request_id)?
            .slot_id()
            .ok_or(EngineError::NotFound(Missing::Request(request_id)))?;
        if self.slots.find_by_id(slot_id).is_none() {
            return Err(EngineError::NotFound(Missing::Slot(slot_id)));
        }
        Ok(slot_id)
    }

    /// Mark the selected slot `Allocated`, move the request to `Allocated` and
    /// journal the decision.
    fn allocate_request(&mut self, request_id: RequestId, selection: Selection) -> Result<(), EngineError> {
        let tick = self.tick;
        self.ledger
            .require(request_id)?
            .check_transition(RequestState::Allocated)?;
        self.slots.allocate(selection.slot_id)?;
        self.ledger.require_mut(request_id)?.allocate(
            SlotAssignment {
                slot_id: selection.slot_id,
                zone_id: selection.zone_id,
            },
            selection.penalty,
            tick,
        )?;
        self.journal.record(AllocationDecision::new(
            request_id,
            selection.slot_id,
            selection.zone_id,
        ));
        Ok(())
    }

    /// Replay the backlog: pop at most its current length, serve in FIFO
    /// order, and stop at the first request that cannot be served (it goes
    /// back to the front). Returns the requests that were allocated.
    pub(super) fn drain_pending(&mut self) -> Vec<RequestId> {
        let mut served = Vec::new();
        let attempts = self.pending.len();
        for _ in 0..attempts {
            let Some(request_id) = self.pending.pop() else {
                break;
            };
            let Some(request) = self.ledger.get(request_id) else {
                continue;
            };
            if request.state() != RequestState::Requested {
                debug!(
                    "Pending request {} dropped in state {:?}",
                    request_id,
                    request.state()
                );
                continue;
            }

            let zone = request.requested_zone();
            let allocated = match select_slot(zone, &self.slots, self.config.cross_zone_penalty) {
                Some(selection) => match self.allocate_request(request_id, selection) {
                    Ok(()) => Some(selection),
                    Err(e) => {
                        warn!("Pending request {} could not be allocated: {}", request_id, e);
                        None
                    }
                },
                None => {
                    debug!("Pending request {} still waiting for capacity", request_id);
                    None
                }
            };

            match allocated {
                Some(selection) => {
                    info!(
                        "Pending request {} allocated slot {} (penalty {})",
                        request_id, selection.slot_id, selection.penalty
                    );
                    served.push(request_id);
                }
                None => {
                    // Unserved requests keep their place at the head.
                    self.pending.requeue_front(request_id);
                    break;
                }
            }
        }
        served
    }
}
