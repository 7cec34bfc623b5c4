//!
//! Sorted-pair SHA-256 Merkle commitments.
//!
//! Interior nodes hash the two children in ascending byte order, so a proof is
//! just the list of siblings: no left/right flags. An odd node at the end of a
//! level is paired with itself.

use sha2::{Digest as _, Sha256};

use super::ProofVerifier;
use crate::primitives::{Address, Digest, DigestBytes};

/// Leaf committed for an allowlist entry: `SHA-256(address ‖ amount_be)`.
pub fn leaf_hash(to: &Address, amount: u64) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(to.as_bytes());
    hasher.update(amount.to_be_bytes());
    DigestBytes(hasher.finalize().into())
}

/// Parent of two nodes, order-independent.
pub fn hash_pair(a: &Digest, b: &Digest) -> Digest {
    let (left, right) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Sha256::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    DigestBytes(hasher.finalize().into())
}

/// Folds `proof` over `leaf` and returns the implied root.
pub fn process_proof(proof: &[Digest], leaf: &Digest) -> Digest {
    proof.iter().fold(*leaf, |acc, sibling| hash_pair(&acc, sibling))
}

/// `ProofVerifier` for trees built by [`MerkleTree`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MerkleVerifier;

impl ProofVerifier for MerkleVerifier {
    fn verify(&self, proof: &[Digest], root: &Digest, leaf: &Digest) -> bool {
        let computed = process_proof(proof, leaf);
        tracing::trace!(%computed, %root, depth = proof.len(), "merkle proof processed");
        computed == *root
    }
}

/// A complete tree over a set of leaves, kept level by level so proofs can be
/// read off directly. Used by allowlist operators and by tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    /// Builds a tree over `leaves`. Leaves are sorted and deduplicated first so
    /// the root does not depend on insertion order.
    pub fn new(mut leaves: Vec<Digest>) -> Self {
        leaves.sort_unstable();
        leaves.dedup();
        let mut levels = vec![leaves];
        while levels.last().map_or(0, Vec::len) > 1 {
            let current = &levels[levels.len() - 1];
            let next: Vec<Digest> = current
                .chunks(2)
                .map(|pair| hash_pair(&pair[0], pair.get(1).unwrap_or(&pair[0])))
                .collect();
            levels.push(next);
        }
        MerkleTree { levels }
    }

    /// Tree over `(address, amount)` allowlist entries.
    pub fn from_allowlist<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a (Address, u64)>,
    {
        Self::new(entries.into_iter().map(|(to, amount)| leaf_hash(to, *amount)).collect())
    }

    /// The commitment. An empty tree commits to the zero digest, which no
    /// proof can reach.
    pub fn root(&self) -> Digest {
        match self.levels.last() {
            Some(top) if top.len() == 1 => top[0],
            _ => DigestBytes::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sibling path for `leaf`, or `None` if the leaf is not in the tree.
    pub fn proof(&self, leaf: &Digest) -> Option<Vec<Digest>> {
        let mut index = self.levels.first()?.binary_search(leaf).ok()?;
        let mut proof = Vec::with_capacity(self.levels.len().saturating_sub(1));
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = if index % 2 == 0 {
                level.get(index + 1).unwrap_or(&level[index])
            } else {
                &level[index - 1]
            };
            proof.push(*sibling);
            index /= 2;
        }
        Some(proof)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::AddressBytes;

    fn allowlist(n: u8) -> Vec<(Address, u64)> {
        (0..n).map(|i| (AddressBytes::repeat(i), u64::from(i) + 1)).collect()
    }

    #[test]
    fn every_member_has_a_valid_proof() {
        for size in 1..=9u8 {
            let entries = allowlist(size);
            let tree = MerkleTree::from_allowlist(&entries);
            let root = tree.root();
            for (to, amount) in &entries {
                let leaf = leaf_hash(to, *amount);
                let proof = tree.proof(&leaf).expect("member must have a proof");
                assert!(MerkleVerifier.verify(&proof, &root, &leaf), "size {size}");
            }
        }
    }

    #[test]
    fn wrong_amount_does_not_verify() {
        let entries = allowlist(4);
        let tree = MerkleTree::from_allowlist(&entries);
        let (to, amount) = entries[2];
        let proof = tree.proof(&leaf_hash(&to, amount)).unwrap();
        assert!(!MerkleVerifier.verify(&proof, &tree.root(), &leaf_hash(&to, amount + 1)));
    }

    #[test]
    fn single_leaf_root_is_the_leaf() {
        let leaf = leaf_hash(&AddressBytes::repeat(3), 5);
        let tree = MerkleTree::new(vec![leaf]);
        assert_eq!(tree.root(), leaf);
        assert_eq!(tree.proof(&leaf), Some(Vec::new()));
    }

    #[test]
    fn empty_tree_rejects_everything() {
        let tree = MerkleTree::new(Vec::new());
        assert!(tree.is_empty());
        assert_eq!(tree.root(), DigestBytes::ZERO);
        let leaf = leaf_hash(&AddressBytes::repeat(1), 1);
        assert_eq!(tree.proof(&leaf), None);
        assert!(!MerkleVerifier.verify(&[], &tree.root(), &leaf));
    }

    #[test]
    fn root_ignores_insertion_order() {
        let mut entries = allowlist(6);
        let forward = MerkleTree::from_allowlist(&entries).root();
        entries.reverse();
        assert_eq!(MerkleTree::from_allowlist(&entries).root(), forward);
    }
}
