//!
//! Engine configuration, fixed at initialization.
//!
//! Every field has a default, so an empty JSON object is a valid (if
//! airdrop-less) configuration.

use std::path::Path;

use crate::domain::{JoinCombinator, Palette, SeededTraitGenerator};
use crate::primitives::{Digest, DigestBytes, GemProfile};
use crate::time::CooldownDurations;
use crate::types::{Seconds, DEFAULT_FORGING_COOLDOWN, DEFAULT_MINING_COOLDOWN, STARTER_RARITY};

/// Errors raised while loading or validating an [`EngineConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(String),
    #[error("malformed config: {0}")]
    Parse(String),
    #[error("merkle root must be 32 hex-encoded bytes: {0}")]
    InvalidRoot(String),
    #[error("combinator separator must not be empty")]
    EmptySeparator,
}

/// Numeric fields of an airdropped gem. Rarity is always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StarterProfile {
    pub staked_value: u64,
    pub mining_power: u64,
    pub forging_power: u64,
}

impl Default for StarterProfile {
    fn default() -> Self {
        StarterProfile { staked_value: 100, mining_power: 10, forging_power: 10 }
    }
}

impl StarterProfile {
    pub fn to_profile(self) -> GemProfile {
        GemProfile {
            staked_value: self.staked_value,
            mining_power: self.mining_power,
            forging_power: self.forging_power,
            rarity: STARTER_RARITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AirdropConfig {
    /// Hex-encoded commitment root, `0x` prefix optional. Empty means no
    /// allowlist (the zero root, which no proof reaches).
    pub merkle_root: String,
    /// Whether claims are accepted right after initialization.
    pub active: bool,
    /// Reject a second claim of the same (recipient, amount) leaf.
    pub replay_protection: bool,
    pub starter: StarterProfile,
}

impl Default for AirdropConfig {
    fn default() -> Self {
        AirdropConfig {
            merkle_root: String::new(),
            active: false,
            replay_protection: true,
            starter: StarterProfile::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub mining_cooldown_secs: Seconds,
    pub forging_cooldown_secs: Seconds,
    pub airdrop: AirdropConfig,
    /// Separator used by the join-based tag combinator.
    pub combinator_separator: String,
    /// Seed for the trait generator; `None` draws from OS entropy.
    pub trait_seed: Option<u64>,
    pub palette: Palette,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            mining_cooldown_secs: DEFAULT_MINING_COOLDOWN,
            forging_cooldown_secs: DEFAULT_FORGING_COOLDOWN,
            airdrop: AirdropConfig::default(),
            combinator_separator: "-".to_string(),
            trait_seed: None,
            palette: Palette::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loading engine config");
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.merkle_root()?;
        if self.combinator_separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        Ok(())
    }

    /// Decodes the configured commitment root.
    pub fn merkle_root(&self) -> Result<Digest, ConfigError> {
        let raw = self.airdrop.merkle_root.trim();
        if raw.is_empty() {
            return Ok(DigestBytes::ZERO);
        }
        let raw = raw.strip_prefix("0x").unwrap_or(raw);
        let bytes = hex::decode(raw).map_err(|e| ConfigError::InvalidRoot(e.to_string()))?;
        let array: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| ConfigError::InvalidRoot(format!("got {} bytes", b.len())))?;
        Ok(DigestBytes(array))
    }

    pub fn cooldowns(&self) -> CooldownDurations {
        CooldownDurations { mining: self.mining_cooldown_secs, forging: self.forging_cooldown_secs }
    }

    pub fn combinator(&self) -> JoinCombinator {
        JoinCombinator::new(self.combinator_separator.clone())
    }

    pub fn trait_generator(&self) -> SeededTraitGenerator {
        match self.trait_seed {
            Some(seed) => SeededTraitGenerator::with_palette(seed, self.palette.clone()),
            None => SeededTraitGenerator::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_yields_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.merkle_root(), Ok(DigestBytes::ZERO));
        assert!(config.airdrop.replay_protection);
    }

    #[test]
    fn root_accepts_optional_prefix() {
        let hex_root = "ab".repeat(32);
        for raw in [hex_root.clone(), format!("0x{hex_root}")] {
            let json = format!(r#"{{"airdrop": {{"merkle_root": "{raw}"}}}}"#);
            let config = EngineConfig::from_json_str(&json).unwrap();
            assert_eq!(config.merkle_root(), Ok(DigestBytes([0xab; 32])));
        }
    }

    #[test]
    fn short_root_is_rejected() {
        let json = r#"{"airdrop": {"merkle_root": "abcd"}}"#;
        assert!(matches!(EngineConfig::from_json_str(json), Err(ConfigError::InvalidRoot(_))));
    }

    #[test]
    fn unknown_top_level_fields_are_rejected() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{"minng_cooldown_secs": 5}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn empty_separator_is_rejected() {
        let json = r#"{"combinator_separator": ""}"#;
        assert_eq!(EngineConfig::from_json_str(json), Err(ConfigError::EmptySeparator));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"mining_cooldown_secs": 60, "forging_cooldown_secs": 180, "trait_seed": 3}}"#)
            .unwrap();
        let config = EngineConfig::from_path(file.path()).unwrap();
        assert_eq!(config.cooldowns(), CooldownDurations { mining: 60, forging: 180 });
        assert_eq!(config.trait_seed, Some(3));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(EngineConfig::from_path(missing), Err(ConfigError::Io(_))));
    }
}
