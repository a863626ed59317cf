//! Request value type and its transition rules.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::slots::{SlotId, ZoneId};
use crate::Tick;

/// Globally unique request id, dense and monotonic from 1.
pub type RequestId = u64;

/// Lifecycle state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestState {
    Requested,
    Allocated,
    Occupied,
    Released,
    Cancelled,
}

impl RequestState {
    /// Whether the state machine has an edge `self -> to`.
    pub fn can_transition(self, to: RequestState) -> bool {
        use RequestState::*;
        matches!(
            (self, to),
            (Requested, Allocated)
                | (Requested, Cancelled)
                | (Allocated, Occupied)
                | (Allocated, Cancelled)
                | (Occupied, Released)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, RequestState::Released | RequestState::Cancelled)
    }

    /// `Allocated` or `Occupied`: the request references a slot.
    pub fn holds_slot(self) -> bool {
        matches!(self, RequestState::Allocated | RequestState::Occupied)
    }
}

/// The slot a request currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot_id: SlotId,
    pub zone_id: ZoneId,
}

/// A demand for one slot, tracked through its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingRequest {
    id: RequestId,
    vehicle_id: String,
    requested_zone: ZoneId,
    state: RequestState,
    /// Present exactly while the request is `Allocated` or `Occupied`.
    assignment: Option<SlotAssignment>,
    request_tick: Tick,
    start_tick: Option<Tick>,
    end_tick: Option<Tick>,
    penalty: f64,
}

impl ParkingRequest {
    pub fn new(id: RequestId, vehicle_id: impl Into<String>, requested_zone: ZoneId, tick: Tick) -> Self {
        Self {
            id,
            vehicle_id: vehicle_id.into(),
            requested_zone,
            state: RequestState::Requested,
            assignment: None,
            request_tick: tick,
            start_tick: None,
            end_tick: None,
            penalty: 0.0,
        }
    }

    /// A fresh `Requested` copy with the same identity, used by rollback.
    pub fn reset(&self, tick: Tick) -> Self {
        Self::new(self.id, self.vehicle_id.clone(), self.requested_zone, tick)
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn requested_zone(&self) -> ZoneId {
        self.requested_zone
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    pub fn assignment(&self) -> Option<SlotAssignment> {
        self.assignment
    }

    pub fn slot_id(&self) -> Option<SlotId> {
        self.assignment.map(|a| a.slot_id)
    }

    pub fn request_tick(&self) -> Tick {
        self.request_tick
    }

    pub fn start_tick(&self) -> Option<Tick> {
        self.start_tick
    }

    pub fn end_tick(&self) -> Option<Tick> {
        self.end_tick
    }

    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Ticks between occupancy and release; `None` until released.
    pub fn duration_ticks(&self) -> Option<Tick> {
        match (self.state, self.start_tick, self.end_tick) {
            (RequestState::Released, Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        }
    }

    /// Fail with `InvalidTransition` unless `self.state -> to` is an edge.
    pub fn check_transition(&self, to: RequestState) -> Result<(), EngineError> {
        if self.state.can_transition(to) {
            Ok(())
        } else {
            Err(EngineError::InvalidTransition {
                request_id: self.id,
                from: self.state,
                to,
            })
        }
    }

    /// `Requested -> Allocated`, recording the slot and its penalty.
    pub fn allocate(
        &mut self,
        assignment: SlotAssignment,
        penalty: f64,
        tick: Tick,
    ) -> Result<(), EngineError> {
        self.check_transition(RequestState::Allocated)?;
        self.state = RequestState::Allocated;
        self.assignment = Some(assignment);
        self.penalty = penalty;
        self.start_tick = Some(tick);
        Ok(())
    }

    /// `Allocated -> Occupied`. Occupancy, not allocation, is the billing origin.
    pub fn occupy(&mut self, tick: Tick) -> Result<(), EngineError> {
        self.check_transition(RequestState::Occupied)?;
        self.state = RequestState::Occupied;
        self.start_tick = Some(tick);
        Ok(())
    }

    /// `Occupied -> Released`. Returns the slot that was held.
    pub fn release(&mut self, tick: Tick) -> Result<Option<SlotAssignment>, EngineError> {
        self.check_transition(RequestState::Released)?;
        self.state = RequestState::Released;
        self.end_tick = Some(tick);
        Ok(self.assignment.take())
    }

    /// `{Requested, Allocated} -> Cancelled`. Returns the slot that was held,
    /// if any; freeing it is the caller's job.
    pub fn cancel(&mut self) -> Result<Option<SlotAssignment>, EngineError> {
        self.check_transition(RequestState::Cancelled)?;
        self.state = RequestState::Cancelled;
        Ok(self.assignment.take())
    }
}
