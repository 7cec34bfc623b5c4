use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use gemforge_core::crypto::{leaf_hash, MerkleTree, MerkleVerifier, ProofVerifier};
use gemforge_core::primitives::AddressBytes;
use gemforge_core::test_utils::*;

fn kernel_benchmarks(c: &mut Criterion) {
    c.bench_function("forge_five", |b| {
        b.iter_batched(
            || {
                let mut kernel = test_kernel();
                let ids = mint_all(&mut kernel, BOB, &[profile(10, 10, 10, 2); 5]);
                (kernel, ids)
            },
            |(mut kernel, ids)| kernel.forge(&ids, BOB, 0),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("mine", |b| {
        b.iter_batched(
            || {
                let mut kernel = test_kernel();
                kernel.mint(ADMIN, ALICE, profile(100, 10, 10, 3)).unwrap();
                kernel
            },
            |mut kernel| kernel.mine(0, ALICE, 0),
            BatchSize::SmallInput,
        )
    });
}

fn merkle_benchmarks(c: &mut Criterion) {
    let entries: Vec<_> = (0..1024u32)
        .map(|i| {
            let mut bytes = [0u8; 32];
            bytes[..4].copy_from_slice(&i.to_be_bytes());
            (AddressBytes(bytes), u64::from(i % 7))
        })
        .collect();
    let tree = MerkleTree::from_allowlist(&entries);
    let leaf = leaf_hash(&entries[513].0, entries[513].1);
    let proof = tree.proof(&leaf).unwrap();
    let root = tree.root();

    c.bench_function("merkle_build_1024", |b| b.iter(|| MerkleTree::from_allowlist(&entries)));
    c.bench_function("merkle_verify_1024", |b| b.iter(|| MerkleVerifier.verify(&proof, &root, &leaf)));
}

criterion_group!(benches, kernel_benchmarks, merkle_benchmarks);
criterion_main!(benches);
