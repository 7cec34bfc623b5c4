#![no_main]

use libfuzzer_sys::fuzz_target;
use gemforge_core::crypto::{leaf_hash, MerkleTree, MerkleVerifier, ProofVerifier};
use gemforge_core::primitives::AddressBytes;

fuzz_target!(|entries: Vec<([u8; 32], u64)>| {
    let entries: Vec<_> = entries.into_iter().map(|(a, n)| (AddressBytes(a), n)).collect();
    let tree = MerkleTree::from_allowlist(&entries);
    let root = tree.root();

    for (to, amount) in &entries {
        let leaf = leaf_hash(to, *amount);
        let proof = tree.proof(&leaf).expect("committed leaf has a proof");
        assert!(MerkleVerifier.verify(&proof, &root, &leaf));
    }
});
