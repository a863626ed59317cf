use bevy::prelude::*;

pub mod actions;
pub mod agent_protocol;
pub mod allocation;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod pending;
pub mod requests;
pub mod rollback;
pub mod slots;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
pub mod test_harness;

pub use coordinator::ParkingSystem;
pub use error::EngineError;

/// Logical clock value. Advances once per mutating operation.
pub type Tick = u64;

/// Registers the engine as ECS resources plus the action pipeline.
///
/// Insert an [`config::EngineConfig`] resource before adding the plugin to
/// override the defaults.
pub struct ParkingPlugin;

impl Plugin for ParkingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<config::EngineConfig>();
        let mut config = app.world().resource::<config::EngineConfig>().clone();
        if let Err(e) = config.validate() {
            warn!("Invalid engine config, falling back to defaults: {}", e);
            config = config::EngineConfig::default();
            app.insert_resource(config.clone());
        }
        app.insert_resource(ParkingSystem::new(config));

        app.add_plugins(actions::ParkingActionsPlugin);
    }
}
