//! Append-only history of every request ever created.

use crate::error::{EngineError, Missing};
use crate::slots::ZoneId;
use crate::Tick;

use super::state::{ParkingRequest, RequestId};

/// Owns all requests. Ids are dense from 1, so request `id` lives at
/// `requests[id - 1]`; nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct RequestLedger {
    requests: Vec<ParkingRequest>,
}

impl RequestLedger {
    /// Create a new `Requested` entry and return its id.
    pub fn create(&mut self, vehicle_id: &str, requested_zone: ZoneId, tick: Tick) -> RequestId {
        let id = self.requests.len() as RequestId + 1;
        self.requests
            .push(ParkingRequest::new(id, vehicle_id, requested_zone, tick));
        id
    }

    pub fn get(&self, id: RequestId) -> Option<&ParkingRequest> {
        let idx = id.checked_sub(1)?;
        self.requests.get(usize::try_from(idx).ok()?)
    }

    pub fn get_mut(&mut self, id: RequestId) -> Option<&mut ParkingRequest> {
        let idx = id.checked_sub(1)?;
        self.requests.get_mut(usize::try_from(idx).ok()?)
    }

    /// Like [`get`](Self::get) but reports `NotFound`.
    pub fn require(&self, id: RequestId) -> Result<&ParkingRequest, EngineError> {
        self.get(id).ok_or(EngineError::NotFound(Missing::Request(id)))
    }

    pub fn require_mut(&mut self, id: RequestId) -> Result<&mut ParkingRequest, EngineError> {
        self.get_mut(id)
            .ok_or(EngineError::NotFound(Missing::Request(id)))
    }

    /// Overwrite a request in place, keeping its slot in the history.
    pub fn replace(&mut self, request: ParkingRequest) -> Result<(), EngineError> {
        let slot = self.require_mut(request.id())?;
        *slot = request;
        Ok(())
    }

    /// All requests in creation order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ParkingRequest> {
        self.requests.iter()
    }

    /// Requests for one vehicle, in creation order.
    pub fn by_vehicle<'a>(
        &'a self,
        vehicle_id: &'a str,
    ) -> impl DoubleEndedIterator<Item = &'a ParkingRequest> + 'a {
        self.requests
            .iter()
            .filter(move |r| r.vehicle_id() == vehicle_id)
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
