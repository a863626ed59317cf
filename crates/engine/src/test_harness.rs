//! # TestLot: headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `ParkingPlugin` so
//! integration tests drive the engine the same way the agent loop does:
//! queue an action, run one update, read the result log.

use bevy::prelude::*;

use crate::actions::{ActionQueue, ActionResult, ActionResultLog, ActionSource, ParkingAction};
use crate::config::EngineConfig;
use crate::coordinator::{EntryReceipt, ReleaseReceipt};
use crate::requests::{RequestId, RequestState};
use crate::slots::{SlotId, SlotStatus, ZoneId};
use crate::{ParkingPlugin, ParkingSystem};

/// A headless Bevy App wrapping `ParkingPlugin` for integration testing.
pub struct TestLot {
    app: App,
}

impl Default for TestLot {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLot {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An empty lot with default config: no zones, no slots.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(config);
        app.add_plugins(ParkingPlugin);
        app.update();
        Self { app }
    }

    /// Shorthand for a lot billing `rate_per_tick`.
    pub fn with_rate(rate_per_tick: f64) -> Self {
        Self::with_config(EngineConfig {
            rate_per_tick,
            ..EngineConfig::default()
        })
    }

    // -----------------------------------------------------------------------
    // World setup (builder pattern)
    // -----------------------------------------------------------------------

    /// Append a zone holding `slots` free slots.
    pub fn with_zone(mut self, slots: u32) -> Self {
        let result = self.act(ParkingAction::AddZone);
        let ActionResult::ZoneAdded { zone_id } = result else {
            panic!("AddZone failed: {result:?}");
        };
        if slots > 0 {
            let result = self.act(ParkingAction::AddSlots {
                zone_id,
                count: slots,
            });
            assert!(result.is_success(), "AddSlots failed: {result:?}");
        }
        self
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Queue one action, run one update, and return its logged result.
    pub fn act(&mut self, action: ParkingAction) -> ActionResult {
        self.app
            .world_mut()
            .resource_mut::<ActionQueue>()
            .push(ActionSource::Operator, action);
        self.app.update();
        self.app
            .world()
            .resource::<ActionResultLog>()
            .last_result()
            .cloned()
            .expect("executor should log a result for every action")
    }

    pub fn entry(&mut self, vehicle_id: &str, zone_id: ZoneId) -> EntryReceipt {
        let result = self.act(ParkingAction::Entry {
            vehicle_id: vehicle_id.to_string(),
            zone_id,
        });
        match result {
            ActionResult::Entered(receipt) => receipt,
            other => panic!("entry({vehicle_id}, {zone_id}) failed: {other:?}"),
        }
    }

    pub fn occupy(&mut self, request_id: RequestId) -> ActionResult {
        self.act(ParkingAction::Occupy { request_id })
    }

    pub fn release(&mut self, request_id: RequestId) -> ActionResult {
        self.act(ParkingAction::Release { request_id })
    }

    /// Release and unwrap the receipt.
    pub fn release_ok(&mut self, request_id: RequestId) -> ReleaseReceipt {
        match self.release(request_id) {
            ActionResult::Released(receipt) => receipt,
            other => panic!("release({request_id}) failed: {other:?}"),
        }
    }

    pub fn cancel(&mut self, request_id: RequestId) -> ActionResult {
        self.act(ParkingAction::Cancel { request_id })
    }

    pub fn rollback(&mut self, count: usize) -> ActionResult {
        self.act(ParkingAction::Rollback { count })
    }

    pub fn advance(&mut self, ticks: u64) -> ActionResult {
        self.act(ParkingAction::AdvanceClock { ticks })
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn system(&self) -> &ParkingSystem {
        self.app.world().resource::<ParkingSystem>()
    }

    pub fn result_log(&self) -> &ActionResultLog {
        self.app.world().resource::<ActionResultLog>()
    }

    pub fn state_of(&self, request_id: RequestId) -> RequestState {
        self.system()
            .request(request_id)
            .map(|r| r.state())
            .unwrap_or_else(|| panic!("request {request_id} does not exist"))
    }

    pub fn slot_of(&self, request_id: RequestId) -> Option<SlotId> {
        self.system().request(request_id).and_then(|r| r.slot_id())
    }

    pub fn slot_status(&self, slot_id: SlotId) -> SlotStatus {
        self.system()
            .slot(slot_id)
            .map(|s| s.status())
            .unwrap_or_else(|| panic!("slot {slot_id} does not exist"))
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    /// Panic with every violated invariant, if any.
    pub fn assert_consistent(&self) {
        let violations = self.system().audit();
        assert!(violations.is_empty(), "invariants violated: {violations:#?}");
    }
}
