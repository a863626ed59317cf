//! Action executor system: drains the [`ActionQueue`] each update and applies
//! every queued [`ParkingAction`] to the [`ParkingSystem`], recording results
//! in the [`ActionResultLog`].

use bevy::prelude::*;

use crate::coordinator::ParkingSystem;

use super::result_log::ActionResultLog;
use super::{ActionQueue, ActionResult, ParkingAction};

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Drains all pending actions from the queue and executes them in order.
pub fn execute_queued_actions(
    mut queue: ResMut<ActionQueue>,
    mut log: ResMut<ActionResultLog>,
    mut system: ResMut<ParkingSystem>,
) {
    for queued in queue.drain() {
        let result = execute_action(&mut system, &queued.action);
        if let Some(err) = result.error() {
            warn!("{:?} action {:?} rejected: {:?}", queued.source, queued.action, err);
        }
        log.push(queued.action, result);
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Apply one action to the engine and convert the outcome for the wire.
pub fn execute_action(system: &mut ParkingSystem, action: &ParkingAction) -> ActionResult {
    let outcome = match action {
        ParkingAction::AddZone => Ok(ActionResult::ZoneAdded {
            zone_id: system.add_zone(),
        }),
        ParkingAction::AddSlots { zone_id, count } => system
            .add_slots(*zone_id, *count)
            .map(|slot_ids| ActionResult::SlotsAdded { slot_ids }),
        ParkingAction::Entry {
            vehicle_id,
            zone_id,
        } => system.entry(vehicle_id, *zone_id).map(ActionResult::Entered),
        ParkingAction::Occupy { request_id } => {
            system.occupy(*request_id).map(|()| ActionResult::Success)
        }
        ParkingAction::Release { request_id } => {
            system.release(*request_id).map(ActionResult::Released)
        }
        ParkingAction::ExitByVehicle { vehicle_id } => {
            system.exit_by_vehicle(vehicle_id).map(ActionResult::Released)
        }
        ParkingAction::Cancel { request_id } => system
            .cancel(*request_id)
            .map(|freed_slot| ActionResult::Cancelled { freed_slot }),
        ParkingAction::Rollback { count } => {
            system.rollback_last(*count).map(ActionResult::RolledBack)
        }
        ParkingAction::Search { vehicle_id } => system
            .search(vehicle_id)
            .map(|request_id| ActionResult::Found { request_id }),
        ParkingAction::AdvanceClock { ticks } => system
            .advance_clock(*ticks)
            .map(|tick| ActionResult::ClockAdvanced { tick }),
    };
    outcome.unwrap_or_else(ActionResult::from)
}
