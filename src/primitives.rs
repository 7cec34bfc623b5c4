use std::fmt;

// --- Universal identifiers --------------------------------------------------

/// Opaque 32-byte account address, as issued by the token ledger.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct AddressBytes(#[serde(with = "serde_bytes")] pub [u8; 32]);
pub type Address = AddressBytes;

impl AddressBytes {
    /// Address whose every byte is `b`. Handy for fixtures and examples.
    pub const fn repeat(b: u8) -> Self {
        AddressBytes([b; 32])
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AddressBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0[..8]))
    }
}

/// 32-byte digest: Merkle roots, leaves and proof siblings.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DigestBytes(#[serde(with = "serde_bytes")] pub [u8; 32]);
pub type Digest = DigestBytes;

impl DigestBytes {
    pub const ZERO: DigestBytes = DigestBytes([0u8; 32]);

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for DigestBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// --- Gem records ------------------------------------------------------------

/// The three categorical tags of a gem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TraitSet {
    pub color: String,
    pub shape: String,
    pub pattern: String,
}

impl TraitSet {
    pub fn new(color: impl Into<String>, shape: impl Into<String>, pattern: impl Into<String>) -> Self {
        TraitSet { color: color.into(), shape: shape.into(), pattern: pattern.into() }
    }
}

/// Numeric attributes supplied when a gem is minted directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct GemProfile {
    pub staked_value: u64,
    pub mining_power: u64,
    pub forging_power: u64,
    pub rarity: u64,
}

/// A gem record. Ownership is not stored here; the ledger keeps it under the
/// same identifier.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Gem {
    pub staked_value: u64,
    pub color: String,
    pub shape: String,
    pub pattern: String,
    pub mining_power: u64,
    pub forging_power: u64,
    pub rarity: u64,
}

impl Gem {
    /// Assembles a gem from a numeric profile and a trait triple.
    pub fn from_parts(profile: GemProfile, traits: TraitSet) -> Self {
        Gem {
            staked_value: profile.staked_value,
            color: traits.color,
            shape: traits.shape,
            pattern: traits.pattern,
            mining_power: profile.mining_power,
            forging_power: profile.forging_power,
            rarity: profile.rarity,
        }
    }

    pub fn profile(&self) -> GemProfile {
        GemProfile {
            staked_value: self.staked_value,
            mining_power: self.mining_power,
            forging_power: self.forging_power,
            rarity: self.rarity,
        }
    }

    pub fn traits(&self) -> TraitSet {
        TraitSet::new(self.color.clone(), self.shape.clone(), self.pattern.clone())
    }
}
