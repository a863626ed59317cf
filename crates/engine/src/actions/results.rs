use serde::{Deserialize, Serialize};

use crate::coordinator::{EntryReceipt, ReleaseReceipt, RollbackReport};
use crate::error::EngineError;
use crate::requests::RequestId;
use crate::slots::{SlotId, ZoneId};
use crate::Tick;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ActionResult {
    Success,
    ZoneAdded { zone_id: ZoneId },
    SlotsAdded { slot_ids: Vec<SlotId> },
    Entered(EntryReceipt),
    Released(ReleaseReceipt),
    Cancelled { freed_slot: Option<SlotId> },
    RolledBack(RollbackReport),
    Found { request_id: RequestId },
    ClockAdvanced { tick: Tick },
    Error(ActionError),
}

impl ActionResult {
    /// Everything except `Error` counts as success.
    pub fn is_success(&self) -> bool {
        !matches!(self, ActionResult::Error(_))
    }

    pub fn error(&self) -> Option<&ActionError> {
        match self {
            ActionResult::Error(e) => Some(e),
            _ => None,
        }
    }
}

/// Serialisable mirror of [`EngineError`] for the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionError {
    NotFound(String),
    InvalidTransition(String),
    InsufficientHistory { requested: usize, available: usize },
    InvalidArgument(String),
}

impl From<EngineError> for ActionError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err {
            EngineError::NotFound(missing) => ActionError::NotFound(missing.to_string()),
            EngineError::InvalidTransition { .. } => ActionError::InvalidTransition(message),
            EngineError::InsufficientHistory {
                requested,
                available,
            } => ActionError::InsufficientHistory {
                requested,
                available,
            },
            EngineError::InvalidArgument(msg) => ActionError::InvalidArgument(msg),
        }
    }
}

impl From<EngineError> for ActionResult {
    fn from(err: EngineError) -> Self {
        ActionResult::Error(err.into())
    }
}
