//! Allowlist airdrop: batch minting of starter gems behind a membership proof
//! and an administrative on/off switch.

use crate::crypto::leaf_hash;
use crate::error::{GemError, GemResult};
use crate::events::Event;
use crate::kernel::runtime::{NewGem, PlanContext, StateDelta};
use crate::primitives::{Address, Digest, Gem};

pub fn plan_claim(
    ctx: &mut PlanContext<'_>,
    to: Address,
    amount: u64,
    proof: &[Digest],
) -> GemResult<StateDelta> {
    tracing::debug!(%to, amount, depth = proof.len(), "planning airdrop claim");

    let airdrop = &ctx.state.airdrop;
    if !airdrop.active {
        return Err(GemError::AirdropInactive);
    }
    let leaf = leaf_hash(&to, amount);
    if !ctx.verifier.verify(proof, &airdrop.root, &leaf) {
        return Err(GemError::InvalidProof);
    }
    if airdrop.replay_protection && airdrop.claimed.contains(&leaf) {
        return Err(GemError::AlreadyClaimed);
    }

    let mut ids = ctx.state.ids;
    let first_gem_id = ids.peek();
    // Reject up front so an exhausted id space never half-draws traits.
    first_gem_id.checked_add(amount).ok_or(GemError::Overflow("airdrop batch"))?;

    let profile = airdrop.starter.to_profile();
    let replay_protection = airdrop.replay_protection;
    let mut minted = Vec::new();
    for _ in 0..amount {
        let id = ids.next()?;
        let gem = Gem::from_parts(profile, ctx.generator.generate_traits());
        minted.push(NewGem { id, owner: to, gem });
    }

    Ok(StateDelta {
        minted,
        allocator: Some(ids),
        claimed_leaf: replay_protection.then_some(leaf),
        events: vec![Event::AirdropClaimed { to, amount, first_gem_id }],
        ..StateDelta::default()
    })
}

pub fn plan_set_active(ctx: &mut PlanContext<'_>, caller: &Address, active: bool) -> GemResult<StateDelta> {
    ctx.authority.require_admin(caller)?;
    Ok(StateDelta {
        airdrop_active: Some(active),
        events: vec![Event::AirdropStatusChanged { active }],
        ..StateDelta::default()
    })
}
