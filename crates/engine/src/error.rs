// ---------------------------------------------------------------------------
// EngineError: typed failures for every coordinator operation
// ---------------------------------------------------------------------------

use std::fmt;

use crate::requests::{RequestId, RequestState};
use crate::slots::{SlotId, ZoneId};

/// The identifier an operation could not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    Request(RequestId),
    Zone(ZoneId),
    Slot(SlotId),
    Vehicle(String),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Request(id) => write!(f, "request {id}"),
            Missing::Zone(id) => write!(f, "zone {id}"),
            Missing::Slot(id) => write!(f, "slot {id}"),
            Missing::Vehicle(vehicle) => write!(f, "vehicle '{vehicle}'"),
        }
    }
}

/// Errors returned by the parking engine.
///
/// All of them are recoverable: an operation that returns an error has not
/// touched any slot, request or journal entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Unknown request, zone, slot or vehicle.
    NotFound(Missing),
    /// The request state machine has no edge `from -> to`.
    InvalidTransition {
        request_id: RequestId,
        from: RequestState,
        to: RequestState,
    },
    /// A rollback asked for more undos than the journal holds.
    InsufficientHistory { requested: usize, available: usize },
    /// A count or identifier argument is out of range.
    InvalidArgument(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NotFound(missing) => write!(f, "Not found: {missing}"),
            EngineError::InvalidTransition {
                request_id,
                from,
                to,
            } => write!(
                f,
                "Invalid transition for request {request_id}: {from:?} -> {to:?}"
            ),
            EngineError::InsufficientHistory {
                requested,
                available,
            } => write!(
                f,
                "Insufficient history: asked to undo {requested} allocations, only {available} recorded"
            ),
            EngineError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
