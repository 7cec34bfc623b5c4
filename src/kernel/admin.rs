//! Administrative operations gated by the authority collaborator.

use crate::error::GemResult;
use crate::events::Event;
use crate::kernel::runtime::{NewGem, PlanContext, StateDelta};
use crate::primitives::{Address, Gem, GemProfile};
use crate::time::CooldownDurations;

/// Direct mint of one gem with caller-chosen numbers and generated tags.
pub fn plan_mint(
    ctx: &mut PlanContext<'_>,
    caller: &Address,
    to: Address,
    profile: GemProfile,
) -> GemResult<StateDelta> {
    ctx.authority.require_admin(caller)?;

    let mut ids = ctx.state.ids;
    let gem_id = ids.next()?;
    let gem = Gem::from_parts(profile, ctx.generator.generate_traits());

    Ok(StateDelta {
        minted: vec![NewGem { id: gem_id, owner: to, gem }],
        allocator: Some(ids),
        events: vec![Event::GemMinted { to, gem_id }],
        ..StateDelta::default()
    })
}

/// New waits apply to cooldowns set from now on; existing deadlines stay.
pub fn plan_set_cooldowns(
    ctx: &mut PlanContext<'_>,
    caller: &Address,
    durations: CooldownDurations,
) -> GemResult<StateDelta> {
    ctx.authority.require_admin(caller)?;
    Ok(StateDelta {
        durations: Some(durations),
        events: vec![Event::CooldownsUpdated { mining: durations.mining, forging: durations.forging }],
        ..StateDelta::default()
    })
}
