//! Mining: one parent spawns one degraded child. The parent survives and goes
//! on cooldown; the child is usable immediately.

use crate::domain::degraded_profile;
use crate::error::GemResult;
use crate::events::Event;
use crate::kernel::runtime::{NewGem, PlanContext, StateDelta};
use crate::primitives::{Address, Gem};
use crate::time::deadline;
use crate::types::{GemId, Timestamp};

pub fn plan_mine(
    ctx: &mut PlanContext<'_>,
    gem_id: GemId,
    owner: Address,
    now: Timestamp,
) -> GemResult<StateDelta> {
    tracing::debug!(gem_id, %owner, now, "planning mine");

    ctx.ensure_holder(gem_id, &owner)?;
    ctx.state.cooldowns.ensure_ready(gem_id, now)?;
    let parent = ctx.state.gems.get(gem_id)?;
    let profile = degraded_profile(gem_id, parent)?;
    let parent_ready_at = deadline(now, ctx.state.durations.mining)?;

    let mut ids = ctx.state.ids;
    let new_gem_id = ids.next()?;
    // Child tags are drawn fresh; the parent's tags are not inherited.
    let child = Gem::from_parts(profile, ctx.generator.generate_traits());

    Ok(StateDelta {
        minted: vec![NewGem { id: new_gem_id, owner, gem: child }],
        cooldowns: vec![(gem_id, parent_ready_at)],
        allocator: Some(ids),
        events: vec![Event::GemMined { owner, new_gem_id }],
        ..StateDelta::default()
    })
}
