use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::ParkingAction;

/// Where a queued action came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionSource {
    Operator,
    Agent,
    Script,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedAction {
    pub source: ActionSource,
    pub action: ParkingAction,
}

/// Actions waiting for the executor, applied in FIFO order.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ActionQueue {
    pending: Vec<QueuedAction>,
}

impl ActionQueue {
    pub fn push(&mut self, source: ActionSource, action: ParkingAction) {
        self.pending.push(QueuedAction { source, action });
    }

    pub fn drain(&mut self) -> Vec<QueuedAction> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
