//! Command planning.
//!
//! Planning executes a `Command` against a read-only view of the current
//! `SystemState` and the injected collaborators, and produces a `StateDelta`.
//! Every precondition is checked here; nothing is mutated. The kernel commits
//! the delta afterwards as a single unit.

use crate::access::Authority;
use crate::crypto::ProofVerifier;
use crate::domain::{AttributeCombinator, Command, TraitGenerator};
use crate::error::{GemError, GemResult};
use crate::events::Event;
use crate::kernel::core::SystemState;
use crate::kernel::{admin, airdrop, forging, mining};
use crate::ledger::TokenLedger;
use crate::primitives::{Address, Digest, Gem};
use crate::store::IdAllocator;
use crate::time::CooldownDurations;
use crate::types::{GemId, Timestamp};

/// A gem the delta will create, and who receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGem {
    pub id: GemId,
    pub owner: Address,
    pub gem: Gem,
}

/// A gem the delta will burn, with the holder verified during planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnedGem {
    pub id: GemId,
    pub owner: Address,
}

/// Represents the changes to the system state resulting from a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateDelta {
    /// Gems to mint, in allocation order.
    pub minted: Vec<NewGem>,
    /// Gems to burn, in request order.
    pub burned: Vec<BurnedGem>,
    /// Cooldown entries to write.
    pub cooldowns: Vec<(GemId, Timestamp)>,
    /// Staged allocator to install; `None` when nothing was allocated.
    pub allocator: Option<IdAllocator>,
    /// Airdrop leaf to record as consumed.
    pub claimed_leaf: Option<Digest>,
    pub airdrop_active: Option<bool>,
    pub durations: Option<CooldownDurations>,
    pub events: Vec<Event>,
}

/// Outcome of a committed command, returned to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    pub minted: Vec<GemId>,
    pub burned: Vec<GemId>,
    pub events: Vec<Event>,
}

impl StateDelta {
    pub fn receipt(&self) -> Receipt {
        Receipt {
            minted: self.minted.iter().map(|g| g.id).collect(),
            burned: self.burned.iter().map(|g| g.id).collect(),
            events: self.events.clone(),
        }
    }
}

/// Read-only state plus the collaborators a planner may consult.
///
/// The generator is the one mutable handle: drawing traits advances it.
pub struct PlanContext<'a> {
    pub state: &'a SystemState,
    pub ledger: &'a dyn TokenLedger,
    pub verifier: &'a dyn ProofVerifier,
    pub authority: &'a dyn Authority,
    pub combinator: &'a dyn AttributeCombinator,
    pub generator: &'a mut dyn TraitGenerator,
}

impl PlanContext<'_> {
    /// Fails unless `owner` holds the live gem `id`.
    pub fn ensure_holder(&self, id: GemId, owner: &Address) -> GemResult<()> {
        let holder = self.ledger.owner_of(id).map_err(GemError::from_lookup)?;
        if holder == *owner {
            Ok(())
        } else {
            Err(GemError::Unauthorized)
        }
    }
}

/// Routes `command` to its planner.
pub fn execute(ctx: &mut PlanContext<'_>, command: &Command) -> GemResult<StateDelta> {
    match command {
        Command::Mint { caller, to, profile } => admin::plan_mint(ctx, caller, *to, *profile),
        Command::Mine { gem_id, owner, now } => mining::plan_mine(ctx, *gem_id, *owner, *now),
        Command::Forge { gem_ids, owner, now } => forging::plan_forge(ctx, gem_ids, *owner, *now),
        Command::Claim { to, amount, proof } => airdrop::plan_claim(ctx, *to, *amount, proof),
        Command::SetAirdropActive { caller, active } => airdrop::plan_set_active(ctx, caller, *active),
        Command::SetCooldowns { caller, mining, forging } => {
            admin::plan_set_cooldowns(ctx, caller, CooldownDurations { mining: *mining, forging: *forging })
        }
    }
}
