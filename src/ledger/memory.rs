use std::collections::{BTreeMap, BTreeSet};

use super::{LedgerError, TokenLedger};
use crate::primitives::Address;
use crate::types::GemId;

/// In-process ledger keyed by token id, with a per-owner index for enumeration.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    owners: BTreeMap<GemId, Address>,
    holdings: BTreeMap<Address, BTreeSet<GemId>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live tokens.
    pub fn total_supply(&self) -> usize {
        self.owners.len()
    }

    pub fn exists(&self, id: GemId) -> bool {
        self.owners.contains_key(&id)
    }

    fn index_remove(&mut self, owner: &Address, id: GemId) {
        if let Some(set) = self.holdings.get_mut(owner) {
            set.remove(&id);
            if set.is_empty() {
                self.holdings.remove(owner);
            }
        }
    }
}

impl TokenLedger for InMemoryLedger {
    fn owner_of(&self, id: GemId) -> Result<Address, LedgerError> {
        self.owners.get(&id).copied().ok_or(LedgerError::NotFound(id))
    }

    fn mint(&mut self, to: Address, id: GemId) -> Result<(), LedgerError> {
        if self.owners.contains_key(&id) {
            return Err(LedgerError::AlreadyMinted(id));
        }
        self.owners.insert(id, to);
        self.holdings.entry(to).or_default().insert(id);
        Ok(())
    }

    fn burn(&mut self, id: GemId) -> Result<(), LedgerError> {
        let owner = self.owners.remove(&id).ok_or(LedgerError::NotFound(id))?;
        self.index_remove(&owner, id);
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, id: GemId) -> Result<(), LedgerError> {
        let current = self.owner_of(id)?;
        if current != from {
            return Err(LedgerError::NotOwner { id, from });
        }
        self.index_remove(&from, id);
        self.owners.insert(id, to);
        self.holdings.entry(to).or_default().insert(id);
        Ok(())
    }

    fn balance_of(&self, owner: &Address) -> usize {
        self.holdings.get(owner).map_or(0, BTreeSet::len)
    }

    fn tokens_of(&self, owner: &Address) -> Vec<GemId> {
        self.holdings
            .get(owner)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::AddressBytes;

    const ALICE: Address = AddressBytes::repeat(1);
    const BOB: Address = AddressBytes::repeat(2);

    #[test]
    fn mint_then_burn_updates_index() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(ALICE, 0).unwrap();
        ledger.mint(ALICE, 3).unwrap();
        assert_eq!(ledger.tokens_of(&ALICE), vec![0, 3]);
        ledger.burn(0).unwrap();
        assert_eq!(ledger.tokens_of(&ALICE), vec![3]);
        assert_eq!(ledger.owner_of(0), Err(LedgerError::NotFound(0)));
        assert_eq!(ledger.total_supply(), 1);
    }

    #[test]
    fn double_mint_is_rejected() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(ALICE, 7).unwrap();
        assert_eq!(ledger.mint(BOB, 7), Err(LedgerError::AlreadyMinted(7)));
        assert_eq!(ledger.owner_of(7), Ok(ALICE));
    }

    #[test]
    fn transfer_requires_current_holder() {
        let mut ledger = InMemoryLedger::new();
        ledger.mint(ALICE, 1).unwrap();
        assert_eq!(
            ledger.transfer(BOB, ALICE, 1),
            Err(LedgerError::NotOwner { id: 1, from: BOB })
        );
        ledger.transfer(ALICE, BOB, 1).unwrap();
        assert_eq!(ledger.balance_of(&ALICE), 0);
        assert_eq!(ledger.balance_of(&BOB), 1);
    }

    #[test]
    fn burn_of_unknown_token_fails() {
        let mut ledger = InMemoryLedger::new();
        assert_eq!(ledger.burn(9), Err(LedgerError::NotFound(9)));
    }
}
