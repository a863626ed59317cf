//! The parking system: orchestrates slots, requests, the pending backlog and
//! the rollback journal behind one set of externally callable operations.
//!
//! ## Clock
//! A logical tick advances once at the start of every `entry`, `occupy`,
//! `release`, `cancel` and `rollback_last` call (failed calls included), and
//! on demand through `advance_clock`. It orders events and is the billing
//! clock: `charge = (end_tick - start_tick) * rate_per_tick + penalty`.
//!
//! ## Replay triggers
//! Any operation that frees a slot (release, cancel of an allocated request,
//! rollback) replays the pending backlog in FIFO order. Adding slots does
//! not replay; the backlog waits for the next freeing event.

pub mod audit;
pub mod stats;
pub mod system;


pub use stats::*;
pub use system::*;
