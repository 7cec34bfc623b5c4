//! Access-control collaborators.
//!
//! Gem ownership checks go through the token ledger; this module only covers
//! administrative privilege (direct mint, airdrop toggles, cooldown tuning).

pub mod authority;

pub use authority::*;
