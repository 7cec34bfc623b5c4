use crate::error::{GemError, GemResult};
use crate::types::GemId;

/// Hands out gem identifiers: strictly increasing, never reused.
///
/// The kernel stages allocation on a copy during planning and installs the
/// copy on commit, so a rejected operation consumes nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IdAllocator {
    next: GemId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from a persisted counter.
    pub fn starting_at(next: GemId) -> Self {
        IdAllocator { next }
    }

    /// Returns the current counter and advances it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> GemResult<GemId> {
        let id = self.next;
        self.next = id.checked_add(1).ok_or(GemError::Overflow("gem identifier"))?;
        Ok(id)
    }

    /// The identifier the next successful mint will receive.
    pub fn peek(&self) -> GemId {
        self.next
    }
}
