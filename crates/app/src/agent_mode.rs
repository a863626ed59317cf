//! Headless agent mode: a blocking synchronous loop that reads JSON commands
//! line by line and writes one JSON response per line.
//!
//! ## Protocol
//!
//! Each input line is a JSON object with a `"cmd"` discriminator.
//! Each output line is a JSON response with `"protocol_version"` and
//! `"type"` fields. See [`engine::agent_protocol`] for the full schema.
//!
//! Logs go to stderr so they never interleave with the protocol stream.

use std::io::{self, BufRead, Write};

use bevy::log::LogPlugin;
use bevy::prelude::*;

use engine::actions::{
    ActionError, ActionQueue, ActionResult, ActionResultLog, ActionSource, ParkingAction,
};
use engine::agent_protocol::{
    make_response, AgentCommand, AgentResponse, ResponsePayload, PROTOCOL_VERSION,
};
use engine::config::EngineConfig;
use engine::{ParkingPlugin, ParkingSystem};

/// A minimal Bevy App with logging and no rendering.
pub fn headless_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()));
    app
}

/// Insert the config and the engine, then run one update so every resource
/// exists before the first command.
pub fn install_engine(app: &mut App, config: EngineConfig) {
    app.insert_resource(config);
    app.add_plugins(ParkingPlugin);
    app.update();
}

/// Serve commands from `input` until `quit` or end of input.
pub fn run_session<R: BufRead, W: Write>(app: &mut App, input: R, output: &mut W) -> io::Result<()> {
    write_response(output, &make_response(ResponsePayload::Ready))?;
    info!("Agent mode v{} ready, waiting for commands", PROTOCOL_VERSION);

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<AgentCommand>(&line) {
            Ok(cmd) => process_command(cmd, app),
            Err(e) => {
                warn!("Unparseable command: {}", e);
                make_response(ResponsePayload::Error {
                    message: format!("Parse error: {e}"),
                })
            }
        };
        let is_goodbye = matches!(response.payload, ResponsePayload::Goodbye);
        write_response(output, &response)?;

        if is_goodbye {
            break;
        }
    }

    info!("Agent mode shutting down");
    Ok(())
}

fn write_response<W: Write>(output: &mut W, response: &AgentResponse) -> io::Result<()> {
    serde_json::to_writer(&mut *output, response)?;
    writeln!(output)?;
    output.flush()
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

fn process_command(cmd: AgentCommand, app: &mut App) -> AgentResponse {
    match cmd {
        AgentCommand::Observe => {
            let dashboard = app
                .world()
                .get_resource::<ParkingSystem>()
                .map(ParkingSystem::dashboard)
                .unwrap_or_default();
            make_response(ResponsePayload::Dashboard { dashboard })
        }

        AgentCommand::Act { action } => make_response(ResponsePayload::ActionResult {
            result: act(app, action),
        }),

        AgentCommand::BatchAct { actions } => {
            let results = actions.into_iter().map(|action| act(app, action)).collect();
            make_response(ResponsePayload::BatchResult { results })
        }

        AgentCommand::Quit => make_response(ResponsePayload::Goodbye),
    }
}

/// Queue one action, run one update so the executor applies it, and read the
/// result back from the log.
fn act(app: &mut App, action: ParkingAction) -> ActionResult {
    match app.world_mut().get_resource_mut::<ActionQueue>() {
        Some(mut queue) => queue.push(ActionSource::Agent, action),
        None => return engine_missing(),
    }
    app.update();

    app.world()
        .get_resource::<ActionResultLog>()
        .and_then(|log| log.last_result().cloned())
        .unwrap_or_else(engine_missing)
}

fn engine_missing() -> ActionResult {
    error!("Action pipeline is not installed");
    ActionResult::Error(ActionError::NotFound("action pipeline".to_string()))
}
