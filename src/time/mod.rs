//! Time-gating utilities.
//!
//! Timestamps are caller-supplied seconds; the kernel never reads a wall
//! clock, which keeps every operation replayable.

pub mod cooldown;

pub use cooldown::*;
