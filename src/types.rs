//! Shared scalar types and constants used across the stores, engines and
//! collaborators.

/// Identifier of a gem. Doubles as the token id in the ledger.
pub type GemId = u64;

/// Seconds since the epoch origin. Cooldowns compare against this.
pub type Timestamp = u64;

/// A span of seconds (cooldown durations).
pub type Seconds = u64;

/// One day, in seconds.
pub const DAY: Seconds = 86_400;

/// Default wait before a mined parent can be used again.
pub const DEFAULT_MINING_COOLDOWN: Seconds = DAY;

/// Default wait before a freshly forged gem can be used.
pub const DEFAULT_FORGING_COOLDOWN: Seconds = 3 * DAY;

/// Smallest accepted forge input set.
pub const MIN_FORGE_INPUTS: usize = 2;

/// Largest accepted forge input set.
pub const MAX_FORGE_INPUTS: usize = 5;

/// Rarity every airdropped gem starts with.
pub const STARTER_RARITY: u64 = 1;
