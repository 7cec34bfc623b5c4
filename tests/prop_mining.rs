use proptest::prelude::*;
use gemforge_core::error::GemError;
use gemforge_core::primitives::GemProfile;
use gemforge_core::test_utils::*;

fn arb_profile() -> impl Strategy<Value = GemProfile> {
    (any::<u64>(), any::<u64>(), any::<u64>(), 1u64..=u64::MAX)
        .prop_map(|(s, m, f, r)| profile(s, m, f, r))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The child halves every numeric attribute and drops one rarity tier; the
    /// parent is left as it was.
    #[test]
    fn prop_child_is_degraded_copy(parent in arb_profile(), now in 0u64..1u64 << 40) {
        let mut kernel = test_kernel();
        let id = kernel.mint(ADMIN, ALICE, parent).unwrap();
        let child = kernel.mine(id, ALICE, now).unwrap();

        let expected = profile(
            parent.staked_value / 2,
            parent.mining_power / 2,
            parent.forging_power / 2,
            parent.rarity - 1,
        );
        prop_assert_eq!(kernel.gem(child).unwrap().profile(), expected);
        prop_assert_eq!(kernel.gem(id).unwrap().profile(), parent);
        prop_assert_eq!(kernel.owner_of(child), Ok(ALICE));
    }

    /// Any attempt strictly before the deadline is rejected; the deadline
    /// itself is accepted.
    #[test]
    fn prop_cooldown_boundary(
        now in 0u64..1u64 << 40,
        wait in 1u64..1u64 << 20,
        early in 1u64..1u64 << 20,
    ) {
        let mut kernel = test_kernel();
        kernel.set_cooldowns(ADMIN, wait, wait).unwrap();
        kernel.mint(ADMIN, ALICE, profile(64, 64, 64, 8)).unwrap();
        kernel.mine(0, ALICE, now).unwrap();

        let ready_at = now + wait;
        let attempt = ready_at - early.min(wait);
        prop_assert_eq!(
            kernel.mine(0, ALICE, attempt),
            Err(GemError::CooldownActive { gem_id: 0, ready_at })
        );
        prop_assert!(kernel.mine(0, ALICE, ready_at).is_ok());
    }

    /// Rarity zero can never be mined, regardless of timing or other stats.
    #[test]
    fn prop_rarity_zero_is_terminal(s in any::<u64>(), m in any::<u64>(), now in any::<u64>()) {
        let mut kernel = test_kernel();
        kernel.mint(ADMIN, BOB, profile(s, m, 1, 0)).unwrap();
        let before = kernel.state.clone();
        prop_assert_eq!(kernel.mine(0, BOB, now), Err(GemError::InvalidRarity(0)));
        prop_assert_eq!(&kernel.state, &before);
    }
}
