use std::collections::BTreeMap;

use crate::error::{GemError, GemResult};
use crate::types::{GemId, Seconds, Timestamp, DEFAULT_FORGING_COOLDOWN, DEFAULT_MINING_COOLDOWN};

/// Gem identifier → earliest timestamp at which the gem may be mined or forged.
/// No entry means ready since the epoch origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CooldownRegistry {
    ready_at: BTreeMap<GemId, Timestamp>,
}

impl CooldownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready_at(&self, id: GemId) -> Timestamp {
        self.ready_at.get(&id).copied().unwrap_or(0)
    }

    pub fn set_ready_at(&mut self, id: GemId, at: Timestamp) {
        self.ready_at.insert(id, at);
    }

    pub fn is_ready(&self, id: GemId, now: Timestamp) -> bool {
        now >= self.ready_at(id)
    }

    /// `Ok(())` when ready, otherwise the `CooldownActive` rejection.
    pub fn ensure_ready(&self, id: GemId, now: Timestamp) -> GemResult<()> {
        let ready_at = self.ready_at(id);
        if now >= ready_at {
            Ok(())
        } else {
            Err(GemError::CooldownActive { gem_id: id, ready_at })
        }
    }

    /// Number of explicit entries, burned gems included.
    pub fn len(&self) -> usize {
        self.ready_at.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ready_at.is_empty()
    }
}

/// How long a gem rests after being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CooldownDurations {
    pub mining: Seconds,
    pub forging: Seconds,
}

impl Default for CooldownDurations {
    fn default() -> Self {
        CooldownDurations { mining: DEFAULT_MINING_COOLDOWN, forging: DEFAULT_FORGING_COOLDOWN }
    }
}

/// `now + wait`, rejecting timestamps past `u64::MAX`.
pub fn deadline(now: Timestamp, wait: Seconds) -> GemResult<Timestamp> {
    now.checked_add(wait).ok_or(GemError::Overflow("cooldown deadline"))
}
