//! Consistency audit across slots, requests, backlog and journal.
//!
//! Used by tests after every step; cheap enough to call from a debug command.

use std::collections::BTreeMap;

use crate::requests::RequestState;
use crate::slots::{SlotId, SlotStatus};

use super::system::ParkingSystem;

impl ParkingSystem {
    /// Return a description of every broken invariant; empty when consistent.
    pub fn audit(&self) -> Vec<String> {
        let mut violations = Vec::new();

        // Conservation per zone.
        for zone in self.slots.zones() {
            if zone.free_count() + zone.in_use_count() != zone.total_slots() {
                violations.push(format!("zone {} free/in-use counts do not add up", zone.id()));
            }
        }

        // Assignment present exactly while holding a slot, one holder per slot.
        let mut holders: BTreeMap<SlotId, Vec<u64>> = BTreeMap::new();
        for request in self.ledger.iter() {
            let holds = request.state().holds_slot();
            match (holds, request.slot_id()) {
                (true, Some(slot_id)) => {
                    holders.entry(slot_id).or_default().push(request.id());
                    let expected = match request.state() {
                        RequestState::Occupied => SlotStatus::Occupied,
                        _ => SlotStatus::Allocated,
                    };
                    match self.slots.status_of(slot_id) {
                        Some(status) if status == expected => {}
                        other => violations.push(format!(
                            "request {} is {:?} but slot {} is {:?}",
                            request.id(),
                            request.state(),
                            slot_id,
                            other
                        )),
                    }
                }
                (true, None) => violations.push(format!(
                    "request {} is {:?} without a slot",
                    request.id(),
                    request.state()
                )),
                (false, Some(slot_id)) => violations.push(format!(
                    "request {} is {:?} but still references slot {}",
                    request.id(),
                    request.state(),
                    slot_id
                )),
                (false, None) => {}
            }
        }
        for (slot_id, ids) in &holders {
            if ids.len() > 1 {
                violations.push(format!("slot {slot_id} held by requests {ids:?}"));
            }
        }

        // Every non-free slot has exactly one holder.
        for zone in self.slots.zones() {
            for slot in zone.slots() {
                if !slot.is_free() && !holders.contains_key(&slot.id()) {
                    violations.push(format!("slot {} is {:?} with no holder", slot.id(), slot.status()));
                }
            }
        }

        // Backlog only references requests waiting for capacity.
        for request_id in self.pending.iter() {
            match self.ledger.get(request_id) {
                Some(request) if request.state() == RequestState::Requested => {}
                Some(request) => violations.push(format!(
                    "pending request {} is {:?}",
                    request_id,
                    request.state()
                )),
                None => violations.push(format!("pending request {request_id} does not exist")),
            }
        }

        // Journal entries point at real requests.
        for decision in self.journal.iter() {
            if self.ledger.get(decision.request_id).is_none() {
                violations.push(format!(
                    "journal references unknown request {}",
                    decision.request_id
                ));
            }
            if decision.prior_state != RequestState::Requested {
                violations.push(format!(
                    "journal entry for request {} has prior state {:?}",
                    decision.request_id, decision.prior_state
                ));
            }
        }

        violations
    }
}
