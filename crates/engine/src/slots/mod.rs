//! Slot storage: zones own their slots, an ordered index resolves slot ids.
//!
//! ## Id scheme
//! Slot ids are namespaced by zone: `zone_id * stride + position`, where
//! `position` counts up from 0 inside the zone. Ids therefore grow
//! monotonically within a zone and never collide across zones as long as a
//! zone holds fewer than `stride` slots (enforced by `add_slots`).
//!
//! ## Index
//! `SlotRegistry` keeps a `BTreeMap<SlotId, SlotLocation>` pointing into the
//! zone-owned slot vectors. Slots are never removed, so a location stays
//! valid for the lifetime of the registry.

pub mod registry;
pub mod types;

#[cfg(test)]
mod tests_registry;

pub use registry::*;
pub use types::*;
