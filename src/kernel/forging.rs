//! Forging: 2 to 5 gems are burned and consolidated into one.
//!
//! Inputs are validated and folded left to right in a single pass. Because
//! planning never mutates, a rejection at any element leaves everything as it
//! was; the burns only happen at commit.

use std::collections::BTreeSet;

use crate::error::{GemError, GemResult};
use crate::events::Event;
use crate::kernel::runtime::{BurnedGem, NewGem, PlanContext, StateDelta};
use crate::primitives::{Address, Gem, GemProfile, TraitSet};
use crate::time::deadline;
use crate::types::{GemId, Timestamp, MAX_FORGE_INPUTS, MIN_FORGE_INPUTS};

/// Adds `next` into the running numeric aggregate: sums for value and powers,
/// max for rarity.
pub fn absorb(acc: GemProfile, next: &Gem) -> GemResult<GemProfile> {
    Ok(GemProfile {
        staked_value: acc
            .staked_value
            .checked_add(next.staked_value)
            .ok_or(GemError::Overflow("forged staked value"))?,
        mining_power: acc
            .mining_power
            .checked_add(next.mining_power)
            .ok_or(GemError::Overflow("forged mining power"))?,
        forging_power: acc
            .forging_power
            .checked_add(next.forging_power)
            .ok_or(GemError::Overflow("forged forging power"))?,
        rarity: acc.rarity.max(next.rarity),
    })
}

pub fn plan_forge(
    ctx: &mut PlanContext<'_>,
    gem_ids: &[GemId],
    owner: Address,
    now: Timestamp,
) -> GemResult<StateDelta> {
    tracing::debug!(?gem_ids, %owner, now, "planning forge");

    if !(MIN_FORGE_INPUTS..=MAX_FORGE_INPUTS).contains(&gem_ids.len()) {
        return Err(GemError::InvalidForgeSize(gem_ids.len()));
    }

    let mut seen = BTreeSet::new();
    let mut burned = Vec::with_capacity(gem_ids.len());
    let mut aggregate: Option<(GemProfile, TraitSet)> = None;

    for &id in gem_ids {
        // A repeated id refers to a gem the earlier occurrence already consumes.
        if !seen.insert(id) {
            return Err(GemError::NotFound(id));
        }
        ctx.ensure_holder(id, &owner)?;
        ctx.state.cooldowns.ensure_ready(id, now)?;
        let gem = ctx.state.gems.get(id)?;

        aggregate = Some(match aggregate {
            None => (gem.profile(), gem.traits()),
            Some((profile, traits)) => {
                (absorb(profile, gem)?, ctx.combinator.combine(&traits, &gem.traits()))
            }
        });
        burned.push(BurnedGem { id, owner });
    }

    let (profile, traits) = aggregate.ok_or(GemError::InvalidForgeSize(0))?;
    let ready_at = deadline(now, ctx.state.durations.forging)?;

    let mut ids = ctx.state.ids;
    let forged_gem_id = ids.next()?;

    Ok(StateDelta {
        minted: vec![NewGem { id: forged_gem_id, owner, gem: Gem::from_parts(profile, traits) }],
        burned,
        cooldowns: vec![(forged_gem_id, ready_at)],
        allocator: Some(ids),
        events: vec![Event::GemForged { owner, forged_gem_id }],
        ..StateDelta::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gem(staked_value: u64, mining_power: u64, forging_power: u64, rarity: u64) -> Gem {
        Gem::from_parts(
            GemProfile { staked_value, mining_power, forging_power, rarity },
            TraitSet::new("c", "s", "p"),
        )
    }

    #[test]
    fn absorb_sums_and_maxes() {
        let acc = gem(10, 10, 10, 1).profile();
        let acc = absorb(acc, &gem(20, 20, 5, 3)).unwrap();
        let acc = absorb(acc, &gem(30, 5, 15, 2)).unwrap();
        assert_eq!(acc, GemProfile { staked_value: 60, mining_power: 35, forging_power: 30, rarity: 3 });
    }

    #[test]
    fn absorb_overflow_is_fatal() {
        let acc = gem(u64::MAX, 0, 0, 0).profile();
        assert_eq!(absorb(acc, &gem(1, 0, 0, 0)), Err(GemError::Overflow("forged staked value")));
        let acc = gem(0, 0, u64::MAX, 0).profile();
        assert_eq!(absorb(acc, &gem(0, 0, 1, 0)), Err(GemError::Overflow("forged forging power")));
    }
}
