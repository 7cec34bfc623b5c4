//! Attribute derivation rules: tag combination, power and rarity degradation.
//!
//! Everything here is pure. Engines call these while planning, before any
//! state is touched.

use crate::error::{GemError, GemResult};
use crate::primitives::{Gem, GemProfile, TraitSet};
use crate::types::GemId;

/// Strategy for fusing two categorical tags into one.
///
/// Implementations must be deterministic, defined for every pair of inputs
/// they can themselves produce, and closed under repeated application: forging
/// folds up to five tag sets left to right through these methods.
pub trait AttributeCombinator: std::fmt::Debug {
    fn combine_color(&self, a: &str, b: &str) -> String;
    fn combine_shape(&self, a: &str, b: &str) -> String;
    fn combine_pattern(&self, a: &str, b: &str) -> String;

    /// Folds `next` into `acc`, tag by tag.
    fn combine(&self, acc: &TraitSet, next: &TraitSet) -> TraitSet {
        TraitSet {
            color: self.combine_color(&acc.color, &next.color),
            shape: self.combine_shape(&acc.shape, &next.shape),
            pattern: self.combine_pattern(&acc.pattern, &next.pattern),
        }
    }
}

/// Joins the two tags with a separator: `"red" + "blue" -> "red-blue"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinCombinator {
    separator: String,
}

impl JoinCombinator {
    pub fn new(separator: impl Into<String>) -> Self {
        JoinCombinator { separator: separator.into() }
    }

    fn join(&self, a: &str, b: &str) -> String {
        let mut out = String::with_capacity(a.len() + self.separator.len() + b.len());
        out.push_str(a);
        out.push_str(&self.separator);
        out.push_str(b);
        out
    }
}

impl Default for JoinCombinator {
    fn default() -> Self {
        JoinCombinator::new("-")
    }
}

impl AttributeCombinator for JoinCombinator {
    fn combine_color(&self, a: &str, b: &str) -> String {
        self.join(a, b)
    }

    fn combine_shape(&self, a: &str, b: &str) -> String {
        self.join(a, b)
    }

    fn combine_pattern(&self, a: &str, b: &str) -> String {
        self.join(a, b)
    }
}

/// Halves a power (or staked value), truncating. Zero stays zero.
#[inline]
pub fn degrade_power(p: u64) -> u64 {
    p / 2
}

/// One rarity tier down. A rarity-0 gem has nothing left to give.
#[inline]
pub fn degrade_rarity(gem_id: GemId, rarity: u64) -> GemResult<u64> {
    rarity.checked_sub(1).ok_or(GemError::InvalidRarity(gem_id))
}

/// Numeric profile of a mined child.
pub fn degraded_profile(gem_id: GemId, parent: &Gem) -> GemResult<GemProfile> {
    Ok(GemProfile {
        staked_value: degrade_power(parent.staked_value),
        mining_power: degrade_power(parent.mining_power),
        forging_power: degrade_power(parent.forging_power),
        rarity: degrade_rarity(gem_id, parent.rarity)?,
    })
}
