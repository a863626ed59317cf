//! Request lifecycle: the state machine and the append-only ledger.
//!
//! ## States
//! `Requested -> Allocated -> Occupied -> Released`, plus the escape edges
//! `Requested -> Cancelled` and `Allocated -> Cancelled`. `Released` and
//! `Cancelled` are terminal.
//!
//! ## Billing origin
//! `start_tick` is stamped on allocation and overwritten on occupancy, so a
//! released request's duration covers the occupancy period only.

pub mod ledger;
pub mod state;

#[cfg(test)]
mod tests_ledger;
#[cfg(test)]
mod tests_state;

pub use ledger::*;
pub use state::*;
