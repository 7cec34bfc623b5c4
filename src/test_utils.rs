//! Fixtures shared by unit tests, integration tests, benches and fuzz targets.

use crate::access::SingleOwnerAuthority;
use crate::config::EngineConfig;
use crate::crypto::{leaf_hash, MerkleTree, MerkleVerifier};
use crate::domain::{FixedTraitGenerator, JoinCombinator};
use crate::kernel::Kernel;
use crate::ledger::{InMemoryLedger, LedgerError, TokenLedger};
use crate::primitives::{Address, AddressBytes, Digest, GemProfile, TraitSet};
use crate::types::GemId;

pub const ADMIN: Address = AddressBytes::repeat(0xad);
pub const ALICE: Address = AddressBytes::repeat(0xa1);
pub const BOB: Address = AddressBytes::repeat(0xb0);
pub const CAROL: Address = AddressBytes::repeat(0xc4);

pub type TestKernel<L = InMemoryLedger> = Kernel<L, MerkleVerifier, FixedTraitGenerator>;

pub fn profile(staked_value: u64, mining_power: u64, forging_power: u64, rarity: u64) -> GemProfile {
    GemProfile { staked_value, mining_power, forging_power, rarity }
}

/// Distinct, recognisable triples: `color0/shape0/pattern0`, `color1/...`, ...
pub fn numbered_traits(n: usize) -> Vec<TraitSet> {
    (0..n)
        .map(|i| TraitSet::new(format!("color{i}"), format!("shape{i}"), format!("pattern{i}")))
        .collect()
}

pub fn kernel_with_ledger<L: TokenLedger>(config: &EngineConfig, ledger: L) -> TestKernel<L> {
    #[cfg(feature = "logging")]
    init_test_logging();
    Kernel::new(
        config,
        ledger,
        MerkleVerifier,
        FixedTraitGenerator::new(numbered_traits(8)),
        SingleOwnerAuthority::new(ADMIN),
        JoinCombinator::default(),
    )
    .expect("fixture config is valid")
}

/// Kernel with default cooldowns, no allowlist and `ADMIN` as administrator.
pub fn test_kernel() -> TestKernel {
    kernel_with_ledger(&EngineConfig::default(), InMemoryLedger::new())
}

/// Kernel whose allowlist commits to `entries`, airdrop already active.
pub fn kernel_with_allowlist(entries: &[(Address, u64)]) -> (TestKernel, MerkleTree) {
    let tree = MerkleTree::from_allowlist(entries);
    let mut config = EngineConfig::default();
    config.airdrop.merkle_root = tree.root().to_string();
    config.airdrop.active = true;
    (kernel_with_ledger(&config, InMemoryLedger::new()), tree)
}

/// Proof for an allowlist entry, empty if the entry is not committed.
pub fn proof_for(tree: &MerkleTree, to: &Address, amount: u64) -> Vec<Digest> {
    tree.proof(&leaf_hash(to, amount)).unwrap_or_default()
}

/// Mints one gem per profile to `to`, returning the ids.
pub fn mint_all<L: TokenLedger>(kernel: &mut TestKernel<L>, to: Address, profiles: &[GemProfile]) -> Vec<GemId> {
    profiles
        .iter()
        .map(|p| kernel.mint(ADMIN, to, *p).expect("admin mint succeeds"))
        .collect()
}

/// In-memory ledger that refuses to mint one particular id.
#[derive(Debug, Clone, Default)]
pub struct FlakyLedger {
    pub inner: InMemoryLedger,
    pub refuse: Option<GemId>,
}

impl FlakyLedger {
    pub fn refusing(id: GemId) -> Self {
        FlakyLedger { inner: InMemoryLedger::new(), refuse: Some(id) }
    }
}

impl TokenLedger for FlakyLedger {
    fn owner_of(&self, id: GemId) -> Result<Address, LedgerError> {
        self.inner.owner_of(id)
    }

    fn mint(&mut self, to: Address, id: GemId) -> Result<(), LedgerError> {
        if self.refuse == Some(id) {
            return Err(LedgerError::Backend(format!("mint of {id} refused")));
        }
        self.inner.mint(to, id)
    }

    fn burn(&mut self, id: GemId) -> Result<(), LedgerError> {
        self.inner.burn(id)
    }

    fn transfer(&mut self, from: Address, to: Address, id: GemId) -> Result<(), LedgerError> {
        self.inner.transfer(from, to, id)
    }

    fn balance_of(&self, owner: &Address) -> usize {
        self.inner.balance_of(owner)
    }

    fn tokens_of(&self, owner: &Address) -> Vec<GemId> {
        self.inner.tokens_of(owner)
    }
}

/// Captured subscriber for test output (default `warn`); ignores "already set".
#[cfg(feature = "logging")]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(crate::telemetry::env_filter("warn"))
        .with_test_writer()
        .try_init();
}
