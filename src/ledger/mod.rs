//! Token ledger collaborator.
//!
//! The ledger is the single source of truth for who holds which gem. The
//! kernel never stores ownership itself; it asks the ledger and keeps gem
//! records in lock-step with the ledger's live token set.

pub mod memory;

pub use memory::InMemoryLedger;

use crate::primitives::Address;
use crate::types::GemId;

/// Errors reported by a ledger implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Token {0} does not exist")]
    NotFound(GemId),
    #[error("Token {0} already exists")]
    AlreadyMinted(GemId),
    #[error("Token {id} is not held by {from}")]
    NotOwner { id: GemId, from: Address },
    #[error("Ledger backend failure: {0}")]
    Backend(String),
}

/// Ownership bookkeeping required by the engines.
///
/// Implementations must make `mint`/`burn` all-or-nothing per call; the kernel
/// composes several calls into one operation and reverts them itself when a
/// later call fails.
pub trait TokenLedger: std::fmt::Debug {
    fn owner_of(&self, id: GemId) -> Result<Address, LedgerError>;

    fn mint(&mut self, to: Address, id: GemId) -> Result<(), LedgerError>;

    fn burn(&mut self, id: GemId) -> Result<(), LedgerError>;

    /// Moves `id` from `from` to `to`. Not used by gem operations but shares
    /// the ledger with them.
    fn transfer(&mut self, from: Address, to: Address, id: GemId) -> Result<(), LedgerError>;

    fn balance_of(&self, owner: &Address) -> usize;

    /// Tokens held by `owner`, ascending.
    fn tokens_of(&self, owner: &Address) -> Vec<GemId>;
}
