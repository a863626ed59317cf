//! Bounded history of executed parking actions and their outcomes.
//!
//! The agent loop reads the newest entry after each update to answer an
//! `act` command; tests use the history to check what a batch did.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::{ActionError, ActionResult, ParkingAction};

/// Entries kept before the oldest is evicted.
const MAX_ENTRIES: usize = 64;

#[derive(Resource, Debug, Clone, Default)]
pub struct ActionResultLog {
    entries: VecDeque<(ParkingAction, ActionResult)>,
}

impl ActionResultLog {
    pub fn push(&mut self, action: ParkingAction, result: ActionResult) {
        if self.entries.len() == MAX_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back((action, result));
    }

    /// Up to `n` newest entries, oldest first.
    pub fn last_n(&self, n: usize) -> Vec<&(ParkingAction, ActionResult)> {
        let start = self.entries.len().saturating_sub(n);
        self.entries.range(start..).collect()
    }

    pub fn last_result(&self) -> Option<&ActionResult> {
        self.entries.back().map(|(_, result)| result)
    }

    /// Newest action the engine refused, with its error.
    pub fn last_rejection(&self) -> Option<(&ParkingAction, &ActionError)> {
        self.entries
            .iter()
            .rev()
            .find_map(|(action, result)| result.error().map(|e| (action, e)))
    }

    /// Retained entries whose action was refused.
    pub fn rejected_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| !r.is_success()).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
