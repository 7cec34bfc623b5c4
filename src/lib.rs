#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Gemforge-Core is a deterministic engine for a collectible-gem economy.
//!
//! Gems are minted, mined (one parent spawns a degraded child) and forged
//! (several gems are burned into one stronger gem), each action gated by a
//! per-gem cooldown. An allowlist airdrop mints starter gems against a Merkle
//! membership proof.
//!
//! Every operation is planned against a read-only view of the state and then
//! committed as one unit, so a rejected command never leaves partial effects.
//! Ownership, admin privilege, proof checking and trait generation are
//! injected collaborators; reference implementations live in this crate.

// Module for common, shared scalar types and constants.
pub mod types;

// Module for core record types (Gem, TraitSet, addresses, digests).
pub mod primitives;

// Re-export all core primitives for easier access at the crate root.
pub use primitives::*;

pub mod config;

// Module for the membership-proof abstraction and the Merkle implementation.
pub mod crypto;

pub mod access;
pub mod domain;
pub mod events;
pub mod ledger;
pub mod store;
pub mod time;

// Module for kernel error types.
pub mod error;

// Module for kernel logic.
pub mod kernel;

#[cfg(feature = "logging")]
pub mod telemetry;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{GemError, GemResult};
pub use kernel::{DefaultKernel, Kernel};
