//! Integration tests for the parking engine using the `TestLot` harness.
//!
//! These tests spin up a headless Bevy App with `ParkingPlugin` and drive it
//! through the action queue, the same path the agent loop uses.
