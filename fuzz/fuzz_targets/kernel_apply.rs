#![no_main]

use libfuzzer_sys::fuzz_target;
use gemforge_core::domain::Command;
use gemforge_core::primitives::{AddressBytes, DigestBytes};
use gemforge_core::test_utils::*;

// Holders are drawn from a small pool so ownership checks pass often enough
// to reach the deeper paths.
#[derive(Debug, Clone, arbitrary::Arbitrary)]
enum FuzzOp {
    Mint { to: u8, staked: u64, mining: u64, forging: u64, rarity: u8 },
    Mine { gem_id: u8, owner: u8, now: u64 },
    Forge { gem_ids: Vec<u8>, owner: u8, now: u64 },
    Claim { to: u8, amount: u8, proof: Vec<[u8; 32]> },
    Toggle { caller: u8, active: bool },
    Cooldowns { caller: u8, mining: u32, forging: u32 },
    Transfer { from: u8, to: u8, gem_id: u8 },
}

fn holder(i: u8) -> gemforge_core::Address {
    [ADMIN, ALICE, BOB, CAROL][usize::from(i % 4)]
}

fuzz_target!(|ops: Vec<FuzzOp>| {
    let (mut kernel, _) = kernel_with_allowlist(&[(ALICE, 2), (BOB, 1), (CAROL, 3)]);

    for op in ops {
        let command = match op {
            FuzzOp::Mint { to, staked, mining, forging, rarity } => Command::Mint {
                caller: ADMIN,
                to: holder(to),
                profile: profile(staked, mining, forging, u64::from(rarity)),
            },
            FuzzOp::Mine { gem_id, owner, now } => {
                Command::Mine { gem_id: u64::from(gem_id), owner: holder(owner), now }
            }
            FuzzOp::Forge { gem_ids, owner, now } => Command::Forge {
                gem_ids: gem_ids.into_iter().map(u64::from).collect(),
                owner: holder(owner),
                now,
            },
            FuzzOp::Claim { to, amount, proof } => Command::Claim {
                to: holder(to),
                amount: u64::from(amount % 8),
                proof: proof.into_iter().map(DigestBytes).collect(),
            },
            FuzzOp::Toggle { caller, active } => Command::SetAirdropActive { caller: holder(caller), active },
            FuzzOp::Cooldowns { caller, mining, forging } => Command::SetCooldowns {
                caller: holder(caller),
                mining: u64::from(mining),
                forging: u64::from(forging),
            },
            FuzzOp::Transfer { from, to, gem_id } => {
                let _ = kernel.transfer(holder(from), AddressBytes::repeat(to), u64::from(gem_id));
                continue;
            }
        };

        let before = kernel.state.clone();
        match kernel.apply(&command) {
            Ok(receipt) => {
                // The event names the first gem the command created.
                let created = receipt.events.iter().find_map(|e| e.created_gem());
                assert_eq!(created, receipt.minted.first().copied(), "event disagrees with receipt");
            }
            Err(_) => assert_eq!(kernel.state, before, "rejected command mutated state"),
        }

        // Every live gem record has exactly one ledger owner and vice versa.
        for (id, _) in kernel.state.gems.iter() {
            assert!(kernel.owner_of(id).is_ok(), "gem {id} has no owner");
        }
        assert_eq!(kernel.ledger().total_supply(), kernel.state.gems.len());
    }
});
