//! FIFO backlog of requests that could not be served at entry time.
//!
//! The queue only stores ids; the ledger stays the source of truth for
//! request state. Replay logic lives in the coordinator, which pops at most
//! [`PendingQueue::len`] entries per trigger and returns the first unserved id
//! to the front before stopping, so arrival order survives a failed replay.

use std::collections::VecDeque;

use crate::requests::RequestId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingQueue {
    ids: VecDeque<RequestId>,
}

impl PendingQueue {
    pub fn push(&mut self, id: RequestId) {
        self.ids.push_back(id);
    }

    pub fn pop(&mut self) -> Option<RequestId> {
        self.ids.pop_front()
    }

    /// Put an id back at the head of the queue.
    pub fn requeue_front(&mut self, id: RequestId) {
        self.ids.push_front(id);
    }

    /// Drop `id` from the queue. Returns whether it was present.
    pub fn remove(&mut self, id: RequestId) -> bool {
        match self.ids.iter().position(|&queued| queued == id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn peek(&self) -> Option<RequestId> {
        self.ids.front().copied()
    }

    pub fn contains(&self, id: RequestId) -> bool {
        self.ids.contains(&id)
    }

    /// Queued ids, front first.
    pub fn iter(&self) -> impl Iterator<Item = RequestId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
