use crate::primitives::Address;
use crate::types::{GemId, Seconds};

/// One committed state change, as seen by external consumers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Administrative mint.
    GemMinted { to: Address, gem_id: GemId },
    /// A child was mined; the parent is not recorded, only the owner and child.
    GemMined { owner: Address, new_gem_id: GemId },
    /// Inputs were burned and consolidated into `forged_gem_id`.
    GemForged { owner: Address, forged_gem_id: GemId },
    /// `amount` starter gems minted with consecutive ids from `first_gem_id`.
    AirdropClaimed { to: Address, amount: u64, first_gem_id: GemId },
    AirdropStatusChanged { active: bool },
    CooldownsUpdated { mining: Seconds, forging: Seconds },
}

impl Event {
    /// The gem this event created, if any.
    pub fn created_gem(&self) -> Option<GemId> {
        match self {
            Event::GemMinted { gem_id, .. } => Some(*gem_id),
            Event::GemMined { new_gem_id, .. } => Some(*new_gem_id),
            Event::GemForged { forged_gem_id, .. } => Some(*forged_gem_id),
            Event::AirdropClaimed { amount, first_gem_id, .. } if *amount > 0 => Some(*first_gem_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::AddressBytes;

    #[test]
    fn empty_claims_create_nothing() {
        let to = AddressBytes::repeat(4);
        assert_eq!(Event::AirdropClaimed { to, amount: 0, first_gem_id: 9 }.created_gem(), None);
        assert_eq!(Event::AirdropClaimed { to, amount: 2, first_gem_id: 9 }.created_gem(), Some(9));
        assert_eq!(Event::AirdropStatusChanged { active: true }.created_gem(), None);
    }
}
