//! Engine constants and the runtime [`EngineConfig`] resource.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Surcharge applied when a request is served outside its requested zone.
pub const CROSS_ZONE_PENALTY: f64 = 5.0;

/// Billing rate charged per tick of occupancy.
pub const DEFAULT_RATE_PER_TICK: f64 = 1.0;

/// Slot ids are `zone_id * SLOT_ID_STRIDE + position`, so a zone holds at most
/// this many slots before its ids would run into the next zone's range.
pub const SLOT_ID_STRIDE: u32 = 1000;

/// Number of zones created when the system starts.
pub const DEFAULT_INITIAL_ZONES: u32 = 0;

/// Tunable parameters for the allocation engine.
///
/// Every field falls back to its default when missing from a JSON document, so
/// a config file only needs to mention the values it overrides.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Charge per tick between occupancy and release.
    pub rate_per_tick: f64,
    /// Fixed penalty added to the charge of a cross-zone allocation.
    pub cross_zone_penalty: f64,
    /// Zones created up front (ids `0..initial_zones`).
    pub initial_zones: u32,
    /// Maximum number of slots per zone; also the zone id multiplier.
    pub slot_id_stride: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rate_per_tick: DEFAULT_RATE_PER_TICK,
            cross_zone_penalty: CROSS_ZONE_PENALTY,
            initial_zones: DEFAULT_INITIAL_ZONES,
            slot_id_stride: SLOT_ID_STRIDE,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("JSON decode error: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot bill or index with.
    pub fn validate(&self) -> Result<(), String> {
        if !self.rate_per_tick.is_finite() || self.rate_per_tick < 0.0 {
            return Err(format!(
                "rate_per_tick must be finite and non-negative, got {}",
                self.rate_per_tick
            ));
        }
        if !self.cross_zone_penalty.is_finite() || self.cross_zone_penalty < 0.0 {
            return Err(format!(
                "cross_zone_penalty must be finite and non-negative, got {}",
                self.cross_zone_penalty
            ));
        }
        if self.slot_id_stride == 0 {
            return Err("slot_id_stride must be greater than zero".to_string());
        }
        Ok(())
    }
}
