//!
//! Core kernel logic: shared state, command application and atomic commit.

use std::collections::BTreeSet;

use crate::access::{Authority, SingleOwnerAuthority};
use crate::config::{EngineConfig, StarterProfile};
use crate::crypto::{MerkleVerifier, ProofVerifier};
use crate::domain::{AttributeCombinator, Command, JoinCombinator, SeededTraitGenerator, TraitGenerator};
use crate::error::{GemError, GemResult};
use crate::events::Event;
use crate::kernel::runtime::{self, PlanContext, Receipt, StateDelta};
use crate::ledger::{InMemoryLedger, LedgerError, TokenLedger};
use crate::primitives::{Address, Digest, Gem, GemProfile};
use crate::store::{GemStore, IdAllocator};
use crate::time::{CooldownDurations, CooldownRegistry};
use crate::types::{GemId, Seconds, Timestamp};

/// Airdrop switch, commitment and claim bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AirdropState {
    pub root: Digest,
    pub active: bool,
    pub replay_protection: bool,
    pub starter: StarterProfile,
    /// Leaves already claimed. Only filled when replay protection is on.
    pub claimed: BTreeSet<Digest>,
}

/// Represents the authoritative state of the gem kernel.
/// Ownership lives in the ledger; everything else the kernel decides on lives here.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SystemState {
    pub gems: GemStore,
    pub cooldowns: CooldownRegistry,
    pub ids: IdAllocator,
    pub durations: CooldownDurations,
    pub airdrop: AirdropState,
    /// Append-only log of events.
    pub event_log: Vec<Event>,
}

impl SystemState {
    pub fn from_config(config: &EngineConfig) -> GemResult<Self> {
        config.validate()?;
        Ok(SystemState {
            gems: GemStore::new(),
            cooldowns: CooldownRegistry::new(),
            ids: IdAllocator::new(),
            durations: config.cooldowns(),
            airdrop: AirdropState {
                root: config.merkle_root()?,
                active: config.airdrop.active,
                replay_protection: config.airdrop.replay_protection,
                starter: config.airdrop.starter,
                claimed: BTreeSet::new(),
            },
            event_log: Vec::new(),
        })
    }
}

/// Ledger step already applied during a commit, kept so it can be undone.
enum Applied {
    Burned { id: GemId, owner: Address },
    Minted { id: GemId },
}

/// The gem kernel, responsible for managing state and processing commands.
///
/// Collaborators are injected: the token ledger, the proof verifier, the trait
/// generator, the admin authority and the tag combinator.
#[derive(Debug, Clone)]
pub struct Kernel<L, V, G, A = SingleOwnerAuthority, C = JoinCombinator>
where
    L: TokenLedger,
    V: ProofVerifier,
    G: TraitGenerator,
    A: Authority,
    C: AttributeCombinator,
{
    /// The authoritative state of the system.
    pub state: SystemState,
    ledger: L,
    verifier: V,
    generator: G,
    authority: A,
    combinator: C,
}

/// Kernel wired with the in-crate reference collaborators.
pub type DefaultKernel = Kernel<InMemoryLedger, MerkleVerifier, SeededTraitGenerator>;

impl<L, V, G, A, C> Kernel<L, V, G, A, C>
where
    L: TokenLedger,
    V: ProofVerifier,
    G: TraitGenerator + Clone,
    A: Authority,
    C: AttributeCombinator,
{
    /// Creates a kernel with empty stores, configured from `config`.
    pub fn new(
        config: &EngineConfig,
        ledger: L,
        verifier: V,
        generator: G,
        authority: A,
        combinator: C,
    ) -> GemResult<Self> {
        let state = SystemState::from_config(config)?;
        Self::restore(state, ledger, verifier, generator, authority, combinator)
    }

    /// Resumes from a previously captured state. Every gem in `state.gems`
    /// must be live in `ledger`.
    pub fn restore(
        state: SystemState,
        ledger: L,
        verifier: V,
        generator: G,
        authority: A,
        combinator: C,
    ) -> GemResult<Self> {
        for (id, _) in state.gems.iter() {
            if ledger.owner_of(id).is_err() {
                return Err(GemError::InvariantViolation(format!("gem {id} has no ledger owner")));
            }
        }
        Ok(Kernel { state, ledger, verifier, generator, authority, combinator })
    }

    /// apply(cmd) → Receipt
    ///
    /// Plans the command against the current state, then commits the
    /// resulting delta. Either every effect lands or none does.
    pub fn apply(&mut self, command: &Command) -> GemResult<Receipt> {
        let op = command.kind();
        // Trait draws only count for commands that commit.
        let saved_generator = self.generator.clone();
        let planned = {
            let mut ctx = PlanContext {
                state: &self.state,
                ledger: &self.ledger,
                verifier: &self.verifier,
                authority: &self.authority,
                combinator: &self.combinator,
                generator: &mut self.generator,
            };
            runtime::execute(&mut ctx, command)
        };
        let delta = match planned {
            Ok(delta) => delta,
            Err(err) => {
                tracing::warn!(op, error = %err, "command rejected");
                self.generator = saved_generator;
                return Err(err);
            }
        };

        let receipt = delta.receipt();
        if let Err(err) = self.append_delta(delta) {
            tracing::warn!(op, error = %err, "commit rejected");
            self.generator = saved_generator;
            return Err(err);
        }
        tracing::info!(op, minted = ?receipt.minted, burned = ?receipt.burned, "command committed");
        Ok(receipt)
    }

    /// Checks the structural invariants a delta must satisfy against the
    /// current state before anything is written.
    fn check_delta(&self, delta: &StateDelta) -> GemResult<()> {
        let mut fresh = BTreeSet::new();
        for new in &delta.minted {
            if !fresh.insert(new.id) {
                return Err(GemError::InvariantViolation(format!("gem {} minted twice in one delta", new.id)));
            }
            if new.id < self.state.ids.peek() {
                return Err(GemError::InvariantViolation(format!("gem id {} was already issued", new.id)));
            }
            if self.state.gems.contains(new.id) || self.ledger.owner_of(new.id).is_ok() {
                return Err(GemError::InvariantViolation(format!("gem {} already exists", new.id)));
            }
        }
        if let (Some(staged), Some(max)) = (delta.allocator, fresh.iter().next_back()) {
            if staged.peek() <= *max {
                return Err(GemError::InvariantViolation("staged allocator behind minted ids".into()));
            }
        }
        for burn in &delta.burned {
            if !self.state.gems.contains(burn.id) {
                return Err(GemError::InvariantViolation(format!("burned gem {} has no record", burn.id)));
            }
            if self.ledger.owner_of(burn.id).map_err(GemError::from_lookup)? != burn.owner {
                return Err(GemError::InvariantViolation(format!("burned gem {} changed hands", burn.id)));
            }
        }
        Ok(())
    }

    /// Applies the ledger side of a delta: burns first, then mints. If the
    /// ledger rejects a step, every step already taken is reverted.
    fn apply_ledger(&mut self, delta: &StateDelta) -> Result<(), LedgerError> {
        let mut journal = Vec::with_capacity(delta.burned.len() + delta.minted.len());
        for burn in &delta.burned {
            if let Err(err) = self.ledger.burn(burn.id) {
                return Err(self.abort_commit(journal, err));
            }
            journal.push(Applied::Burned { id: burn.id, owner: burn.owner });
        }
        for new in &delta.minted {
            if let Err(err) = self.ledger.mint(new.owner, new.id) {
                return Err(self.abort_commit(journal, err));
            }
            journal.push(Applied::Minted { id: new.id });
        }
        Ok(())
    }

    fn abort_commit(&mut self, journal: Vec<Applied>, err: LedgerError) -> LedgerError {
        tracing::warn!(error = %err, undo = journal.len(), "ledger rejected commit, rolling back");
        for step in journal.into_iter().rev() {
            let undone = match step {
                Applied::Burned { id, owner } => self.ledger.mint(owner, id),
                Applied::Minted { id } => self.ledger.burn(id),
            };
            if let Err(undo_err) = undone {
                tracing::error!(error = %undo_err, "ledger rollback step failed");
            }
        }
        err
    }

    /// Commit `delta` into the state, checking basic invariants first.
    pub fn append_delta(&mut self, delta: StateDelta) -> GemResult<()> {
        self.check_delta(&delta)?;
        self.apply_ledger(&delta)?;

        // Burned records were checked above, so removal cannot miss.
        for burn in &delta.burned {
            self.state.gems.remove(burn.id)?;
        }
        for new in delta.minted {
            self.state.gems.put(new.id, new.gem);
        }
        for (id, at) in delta.cooldowns {
            self.state.cooldowns.set_ready_at(id, at);
        }
        if let Some(ids) = delta.allocator {
            self.state.ids = ids;
        }
        if let Some(leaf) = delta.claimed_leaf {
            self.state.airdrop.claimed.insert(leaf);
        }
        if let Some(active) = delta.airdrop_active {
            self.state.airdrop.active = active;
        }
        if let Some(durations) = delta.durations {
            self.state.durations = durations;
        }
        self.state.event_log.extend(delta.events);
        Ok(())
    }

    fn single_minted(receipt: Receipt) -> GemResult<GemId> {
        receipt
            .minted
            .first()
            .copied()
            .ok_or_else(|| GemError::InvariantViolation("operation committed without minting".into()))
    }

    // --- Operations ----------------------------------------------------------

    /// Administrative mint. Tags come from the trait generator.
    pub fn mint(&mut self, caller: Address, to: Address, profile: GemProfile) -> GemResult<GemId> {
        let receipt = self.apply(&Command::Mint { caller, to, profile })?;
        Self::single_minted(receipt)
    }

    pub fn mine(&mut self, gem_id: GemId, owner: Address, now: Timestamp) -> GemResult<GemId> {
        let receipt = self.apply(&Command::Mine { gem_id, owner, now })?;
        Self::single_minted(receipt)
    }

    pub fn forge(&mut self, gem_ids: &[GemId], owner: Address, now: Timestamp) -> GemResult<GemId> {
        let receipt = self.apply(&Command::Forge { gem_ids: gem_ids.to_vec(), owner, now })?;
        Self::single_minted(receipt)
    }

    /// Returns the ids minted to `to`, in order.
    pub fn claim(&mut self, to: Address, amount: u64, proof: &[Digest]) -> GemResult<Vec<GemId>> {
        let receipt = self.apply(&Command::Claim { to, amount, proof: proof.to_vec() })?;
        Ok(receipt.minted)
    }

    pub fn activate_airdrop(&mut self, caller: Address) -> GemResult<()> {
        self.apply(&Command::SetAirdropActive { caller, active: true }).map(|_| ())
    }

    pub fn deactivate_airdrop(&mut self, caller: Address) -> GemResult<()> {
        self.apply(&Command::SetAirdropActive { caller, active: false }).map(|_| ())
    }

    pub fn set_cooldowns(&mut self, caller: Address, mining: Seconds, forging: Seconds) -> GemResult<()> {
        self.apply(&Command::SetCooldowns { caller, mining, forging }).map(|_| ())
    }

    /// Plain ledger transfer. Gem records and cooldowns follow the id, not the holder.
    pub fn transfer(&mut self, from: Address, to: Address, gem_id: GemId) -> GemResult<()> {
        self.ledger.transfer(from, to, gem_id).map_err(|err| match err {
            LedgerError::NotFound(id) => GemError::NotFound(id),
            LedgerError::NotOwner { .. } => GemError::Unauthorized,
            other => GemError::Ledger(other),
        })
    }

    // --- Queries -------------------------------------------------------------

    pub fn gem(&self, gem_id: GemId) -> GemResult<&Gem> {
        self.state.gems.get(gem_id)
    }

    pub fn owner_of(&self, gem_id: GemId) -> GemResult<Address> {
        self.ledger.owner_of(gem_id).map_err(GemError::from_lookup)
    }

    /// Live gems held by `owner`, ascending by id.
    pub fn gems_of(&self, owner: &Address) -> Vec<(GemId, &Gem)> {
        self.ledger
            .tokens_of(owner)
            .into_iter()
            .filter_map(|id| self.state.gems.get(id).ok().map(|gem| (id, gem)))
            .collect()
    }

    pub fn ready_at(&self, gem_id: GemId) -> Timestamp {
        self.state.cooldowns.ready_at(gem_id)
    }

    pub fn is_ready(&self, gem_id: GemId, now: Timestamp) -> bool {
        self.state.cooldowns.is_ready(gem_id, now)
    }

    pub fn events(&self) -> &[Event] {
        &self.state.event_log
    }

    pub fn airdrop_active(&self) -> bool {
        self.state.airdrop.active
    }

    pub fn next_gem_id(&self) -> GemId {
        self.state.ids.peek()
    }

    pub fn cooldown_durations(&self) -> CooldownDurations {
        self.state.durations
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn authority_mut(&mut self) -> &mut A {
        &mut self.authority
    }

    /// Serializes the kernel-owned state (not the ledger) to JSON.
    pub fn snapshot_json(&self) -> GemResult<String> {
        serde_json::to_string(&self.state)
            .map_err(|e| GemError::InvariantViolation(format!("state snapshot failed: {e}")))
    }
}

impl DefaultKernel {
    /// Kernel with an empty in-memory ledger, Merkle proofs, seeded traits and
    /// `admin` as the single administrator.
    pub fn from_config(config: &EngineConfig, admin: Address) -> GemResult<Self> {
        Self::new(
            config,
            InMemoryLedger::new(),
            MerkleVerifier,
            config.trait_generator(),
            SingleOwnerAuthority::new(admin),
            config.combinator(),
        )
    }
}

/// Parses a snapshot produced by [`Kernel::snapshot_json`].
pub fn state_from_json(raw: &str) -> GemResult<SystemState> {
    serde_json::from_str(raw).map_err(|e| GemError::Config(crate::config::ConfigError::Parse(e.to_string())))
}
