//! Candidate selection: picks the best free slot for a requested zone.
//!
//! Every free slot in every zone is a candidate. A candidate in the requested
//! zone carries no penalty; any other zone carries the fixed cross-zone
//! penalty. The winner minimises `(penalty, slot_id)`, so a same-zone slot
//! always beats a cross-zone one and ties go to the lowest slot id. A
//! configured penalty of zero still ranks same-zone candidates first.
//!
//! Selection is read-only. Marking the slot `Allocated` is the caller's job,
//! which lets the entry path and the pending-queue replay share this routine.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::slots::{SlotId, SlotRegistry, ZoneId};

/// The slot chosen for a request, with the penalty it will be billed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub slot_id: SlotId,
    pub zone_id: ZoneId,
    pub penalty: f64,
}

struct Candidate {
    selection: Selection,
    cross_zone: bool,
}

impl Candidate {
    fn rank(&self, other: &Self) -> Ordering {
        self.selection
            .penalty
            .total_cmp(&other.selection.penalty)
            .then(self.cross_zone.cmp(&other.cross_zone))
            .then(self.selection.slot_id.cmp(&other.selection.slot_id))
    }
}

/// Select the best free slot for `requested_zone`, or `None` when every slot
/// in the system is taken.
pub fn select_slot(
    requested_zone: ZoneId,
    registry: &SlotRegistry,
    cross_zone_penalty: f64,
) -> Option<Selection> {
    registry
        .zones()
        .iter()
        .flat_map(|zone| zone.slots().iter())
        .filter(|slot| slot.is_free())
        .map(|slot| {
            let cross_zone = slot.zone_id() != requested_zone;
            Candidate {
                selection: Selection {
                    slot_id: slot.id(),
                    zone_id: slot.zone_id(),
                    penalty: if cross_zone { cross_zone_penalty } else { 0.0 },
                },
                cross_zone,
            }
        })
        .min_by(Candidate::rank)
        .map(|candidate| candidate.selection)
}
