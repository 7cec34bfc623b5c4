//!
//! Membership-proof abstraction for the airdrop allowlist.
//!
//! The kernel treats proof checking as a trusted predicate. It only needs to
//! ask "does this proof place this leaf under that root"; how the commitment
//! is built is up to the implementation.

use crate::primitives::Digest;

/// Trait defining the membership check consumed by the airdrop engine.
pub trait ProofVerifier: std::fmt::Debug {
    /// Returns `true` when `proof` links `leaf` to `root`.
    ///
    /// # Arguments
    /// * `proof`: sibling digests from the leaf level upwards.
    /// * `root`: the commitment fixed at initialization.
    /// * `leaf`: the claimant's leaf digest.
    fn verify(&self, proof: &[Digest], root: &Digest, leaf: &Digest) -> bool;
}

// Sorted-pair SHA-256 Merkle tree.
pub mod merkle;

pub use merkle::{leaf_hash, MerkleTree, MerkleVerifier};
