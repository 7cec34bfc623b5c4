use crate::primitives::{Address, Digest, GemProfile};
use crate::types::{GemId, Seconds, Timestamp};

/// A request to the kernel. Each variant is applied as one atomic transaction.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Administrative mint of a single gem with the given numeric profile.
    Mint { caller: Address, to: Address, profile: GemProfile },
    /// Spawn a degraded child from `gem_id`.
    Mine { gem_id: GemId, owner: Address, now: Timestamp },
    /// Consolidate 2 to 5 gems into one, burning the inputs.
    Forge { gem_ids: Vec<GemId>, owner: Address, now: Timestamp },
    /// Allowlist claim of `amount` starter gems.
    Claim { to: Address, amount: u64, proof: Vec<Digest> },
    /// Administrative airdrop switch.
    SetAirdropActive { caller: Address, active: bool },
    /// Administrative cooldown tuning.
    SetCooldowns { caller: Address, mining: Seconds, forging: Seconds },
}

impl Command {
    /// Short operation name, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Mint { .. } => "mint",
            Command::Mine { .. } => "mine",
            Command::Forge { .. } => "forge",
            Command::Claim { .. } => "claim",
            Command::SetAirdropActive { .. } => "set_airdrop_active",
            Command::SetCooldowns { .. } => "set_cooldowns",
        }
    }
}
