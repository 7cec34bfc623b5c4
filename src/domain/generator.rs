//! Trait generators: where fresh (non-forged) gems get their tags.
//!
//! The engines never pick tags themselves. They ask the injected generator
//! exactly once per generated gem, which keeps the randomness source
//! swappable (seeded PRNG, oracle, fixed table) and tests deterministic.

use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

use crate::primitives::TraitSet;

/// Source of fresh trait triples.
pub trait TraitGenerator: std::fmt::Debug {
    /// Returns one new triple per call.
    fn generate_traits(&mut self) -> TraitSet;
}

/// Tag tables a [`SeededTraitGenerator`] draws from.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    pub colors: Vec<String>,
    pub shapes: Vec<String>,
    pub patterns: Vec<String>,
}

impl Palette {
    /// A palette with an empty table cannot produce a tag.
    pub fn is_usable(&self) -> bool {
        !self.colors.is_empty() && !self.shapes.is_empty() && !self.patterns.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
        Palette {
            colors: owned(&["ruby", "sapphire", "emerald", "amber", "onyx", "pearl"]),
            shapes: owned(&["round", "oval", "princess", "marquise", "pear", "cushion"]),
            patterns: owned(&["clear", "clouded", "banded", "speckled", "starred"]),
        }
    }
}

/// ChaCha8-backed generator. The same seed and palette always yield the same
/// sequence of triples.
#[derive(Debug, Clone)]
pub struct SeededTraitGenerator {
    rng: ChaCha8Rng,
    palette: Palette,
}

impl SeededTraitGenerator {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_palette(seed, Palette::default())
    }

    /// Seeds from operating-system entropy. Not reproducible.
    pub fn from_entropy() -> Self {
        SeededTraitGenerator { rng: ChaCha8Rng::from_entropy(), palette: Palette::default() }
    }

    /// Falls back to the default palette when `palette` has an empty table.
    pub fn with_palette(seed: u64, palette: Palette) -> Self {
        let palette = if palette.is_usable() {
            palette
        } else {
            tracing::warn!("trait palette has an empty table, using the default palette");
            Palette::default()
        };
        SeededTraitGenerator { rng: ChaCha8Rng::seed_from_u64(seed), palette }
    }

    fn pick(rng: &mut ChaCha8Rng, table: &[String]) -> String {
        let index = (rng.next_u64() % table.len() as u64) as usize;
        table[index].clone()
    }
}

impl TraitGenerator for SeededTraitGenerator {
    fn generate_traits(&mut self) -> TraitSet {
        TraitSet {
            color: Self::pick(&mut self.rng, &self.palette.colors),
            shape: Self::pick(&mut self.rng, &self.palette.shapes),
            pattern: Self::pick(&mut self.rng, &self.palette.patterns),
        }
    }
}

/// Cycles through a fixed list of triples and counts how often it was asked.
#[derive(Debug, Clone)]
pub struct FixedTraitGenerator {
    table: Vec<TraitSet>,
    calls: usize,
}

impl FixedTraitGenerator {
    /// An empty table behaves like a single `plain` triple.
    pub fn new(table: Vec<TraitSet>) -> Self {
        let table = if table.is_empty() {
            vec![TraitSet::new("plain", "plain", "plain")]
        } else {
            table
        };
        FixedTraitGenerator { table, calls: 0 }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Default for FixedTraitGenerator {
    fn default() -> Self {
        FixedTraitGenerator::new(Vec::new())
    }
}

impl TraitGenerator for FixedTraitGenerator {
    fn generate_traits(&mut self) -> TraitSet {
        let traits = self.table[self.calls % self.table.len()].clone();
        self.calls += 1;
        traits
    }
}
