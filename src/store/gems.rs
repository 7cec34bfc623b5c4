use std::collections::BTreeMap;

use crate::error::{GemError, GemResult};
use crate::primitives::Gem;
use crate::types::GemId;

/// Gem identifier → gem record. Create, read and delete only; callers own
/// field validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GemStore {
    gems: BTreeMap<GemId, Gem>,
}

impl GemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite.
    pub fn put(&mut self, id: GemId, gem: Gem) {
        self.gems.insert(id, gem);
    }

    pub fn get(&self, id: GemId) -> GemResult<&Gem> {
        self.gems.get(&id).ok_or(GemError::NotFound(id))
    }

    /// Removing an absent id is a caller bug and is reported, not ignored.
    pub fn remove(&mut self, id: GemId) -> GemResult<Gem> {
        self.gems.remove(&id).ok_or(GemError::NotFound(id))
    }

    pub fn contains(&self, id: GemId) -> bool {
        self.gems.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.gems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gems.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GemId, &Gem)> {
        self.gems.iter().map(|(id, gem)| (*id, gem))
    }
}
