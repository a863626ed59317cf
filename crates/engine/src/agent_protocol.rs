//! Agent text protocol types for the headless command loop.
//!
//! Defines the JSON command/response envelope that external programs (menus,
//! scripts, test harnesses) use to drive the parking engine over
//! newline-delimited JSON on stdin/stdout.
//!
//! These types live in the `engine` crate so they can be unit-tested
//! without pulling in the app binary. The actual I/O loop lives in
//! `crates/app/src/agent_mode.rs`.

use serde::{Deserialize, Serialize};

use crate::actions::{ActionResult, ParkingAction};
use crate::coordinator::Dashboard;

// ---------------------------------------------------------------------------
// Commands (stdin -> engine)
// ---------------------------------------------------------------------------

/// A single command sent over stdin. The `cmd` field is the discriminator.
#[derive(Debug, Deserialize)]
#[serde(tag = "cmd")]
pub enum AgentCommand {
    /// Request the current dashboard snapshot.
    #[serde(rename = "observe")]
    Observe,

    /// Execute a single action.
    #[serde(rename = "act")]
    Act { action: ParkingAction },

    /// Execute several actions in sequence, one update each.
    #[serde(rename = "batch_act")]
    BatchAct { actions: Vec<ParkingAction> },

    /// End the session.
    #[serde(rename = "quit")]
    Quit,
}

// ---------------------------------------------------------------------------
// Responses (engine -> stdout)
// ---------------------------------------------------------------------------

/// Every response carries the protocol version and a tagged payload.
#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub protocol_version: u32,
    #[serde(flatten)]
    pub payload: ResponsePayload,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum ResponsePayload {
    /// The engine is ready to accept commands.
    #[serde(rename = "ready")]
    Ready,

    #[serde(rename = "dashboard")]
    Dashboard { dashboard: Dashboard },

    #[serde(rename = "action_result")]
    ActionResult { result: ActionResult },

    #[serde(rename = "batch_result")]
    BatchResult { results: Vec<ActionResult> },

    /// The command could not be parsed or processed.
    #[serde(rename = "error")]
    Error { message: String },

    /// Response to `quit`.
    #[serde(rename = "goodbye")]
    Goodbye,
}

/// Current protocol version. Bump when the command/response schema changes.
pub const PROTOCOL_VERSION: u32 = 1;

pub fn make_response(payload: ResponsePayload) -> AgentResponse {
    AgentResponse {
        protocol_version: PROTOCOL_VERSION,
        payload,
    }
}
