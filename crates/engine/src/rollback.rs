//! LIFO journal of successful allocations.
//!
//! Every allocation (at entry or from the pending backlog) pushes one
//! [`AllocationDecision`]. Undo pops the most recent decisions first. The log
//! is not capped: it grows with every successful allocation until entries are
//! consumed by a rollback.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::requests::{RequestId, RequestState};
use crate::slots::{SlotId, ZoneId};

/// Snapshot of one allocation, enough to reverse it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationDecision {
    pub request_id: RequestId,
    pub slot_id: SlotId,
    pub zone_id: ZoneId,
    /// State of the request just before the allocation; always `Requested`.
    pub prior_state: RequestState,
}

impl AllocationDecision {
    pub fn new(request_id: RequestId, slot_id: SlotId, zone_id: ZoneId) -> Self {
        Self {
            request_id,
            slot_id,
            zone_id,
            prior_state: RequestState::Requested,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollbackLog {
    decisions: Vec<AllocationDecision>,
}

impl RollbackLog {
    pub fn record(&mut self, decision: AllocationDecision) {
        self.decisions.push(decision);
    }

    /// Check that `k` undos can be served, without touching the log.
    pub fn check_undo(&self, k: usize) -> Result<(), EngineError> {
        if k == 0 {
            return Err(EngineError::InvalidArgument(
                "rollback count must be positive".to_string(),
            ));
        }
        if k > self.decisions.len() {
            return Err(EngineError::InsufficientHistory {
                requested: k,
                available: self.decisions.len(),
            });
        }
        Ok(())
    }

    /// Remove and return the `k` most recent decisions, most recent first.
    /// All-or-nothing: fails without mutation if fewer than `k` are recorded.
    pub fn take_last(&mut self, k: usize) -> Result<Vec<AllocationDecision>, EngineError> {
        self.check_undo(k)?;
        let split = self.decisions.len() - k;
        let mut taken = self.decisions.split_off(split);
        taken.reverse();
        Ok(taken)
    }

    /// Most recent decision without consuming it.
    pub fn last(&self) -> Option<&AllocationDecision> {
        self.decisions.last()
    }

    /// Decisions oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &AllocationDecision> {
        self.decisions.iter()
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}
