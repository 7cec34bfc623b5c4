//!
//! Defines error types for the gem kernel.

use crate::config::ConfigError;
use crate::ledger::LedgerError;
use crate::types::{GemId, Timestamp};

/// Represents errors that can occur while validating or committing a gem operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GemError {
    /// The referenced gem is not live (never minted, or already burned).
    #[error("Gem {0} not found")]
    NotFound(GemId),
    /// The caller does not hold the referenced gem, or lacks admin privilege.
    #[error("Caller is not authorized for this operation")]
    Unauthorized,
    /// The gem's cooldown has not elapsed yet.
    #[error("Gem {gem_id} is cooling down until {ready_at}")]
    CooldownActive { gem_id: GemId, ready_at: Timestamp },
    /// A rarity-0 gem cannot be mined.
    #[error("Gem {0} has rarity 0 and cannot be mined")]
    InvalidRarity(GemId),
    /// Forge input set outside the accepted range.
    #[error("Forge requires 2 to 5 gems, got {0}")]
    InvalidForgeSize(usize),
    /// Claims are only accepted while the airdrop is active.
    #[error("Airdrop is not active")]
    AirdropInactive,
    /// The membership proof does not resolve to the committed root.
    #[error("Membership proof is invalid")]
    InvalidProof,
    /// The (recipient, amount) leaf was already claimed.
    #[error("Airdrop leaf already claimed")]
    AlreadyClaimed,
    /// Checked arithmetic failed; the whole operation is rejected.
    #[error("Arithmetic overflow in {0}")]
    Overflow(&'static str),
    /// The ledger collaborator rejected a mutation.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
    /// A planned delta violated a store invariant at commit time.
    #[error("Kernel invariant violation: {0}")]
    InvariantViolation(String),
    /// Configuration could not be loaded or is malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl GemError {
    /// Lifts a ledger lookup failure into the domain error a caller expects:
    /// an unknown token reads as `NotFound`, everything else stays a ledger error.
    pub(crate) fn from_lookup(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => GemError::NotFound(id),
            other => GemError::Ledger(other),
        }
    }
}

pub type GemResult<T> = Result<T, GemError>;
