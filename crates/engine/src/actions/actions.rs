use serde::{Deserialize, Serialize};

use crate::requests::RequestId;
use crate::slots::ZoneId;

/// Every operation an outer surface can ask the engine to perform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ParkingAction {
    AddZone,
    AddSlots {
        zone_id: ZoneId,
        count: u32,
    },
    Entry {
        vehicle_id: String,
        zone_id: ZoneId,
    },
    Occupy {
        request_id: RequestId,
    },
    Release {
        request_id: RequestId,
    },
    ExitByVehicle {
        vehicle_id: String,
    },
    Cancel {
        request_id: RequestId,
    },
    Rollback {
        count: usize,
    },
    Search {
        vehicle_id: String,
    },
    AdvanceClock {
        ticks: u64,
    },
}
