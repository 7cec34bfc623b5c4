use proptest::prelude::*;
use gemforge_core::error::GemError;
use gemforge_core::primitives::GemProfile;
use gemforge_core::test_utils::*;

fn arb_profile() -> impl Strategy<Value = GemProfile> {
    (0u64..1u64 << 48, 0u64..1u64 << 48, 0u64..1u64 << 48, any::<u64>())
        .prop_map(|(s, m, f, r)| profile(s, m, f, r))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Numeric attributes sum, rarity takes the maximum, inputs disappear.
    #[test]
    fn prop_forge_sums_and_burns(
        profiles in prop::collection::vec(arb_profile(), 2..=5),
        now in 0u64..1u64 << 40,
    ) {
        let mut kernel = test_kernel();
        let ids = mint_all(&mut kernel, BOB, &profiles);
        let forged = kernel.forge(&ids, BOB, now).unwrap();

        let expected = profile(
            profiles.iter().map(|p| p.staked_value).sum(),
            profiles.iter().map(|p| p.mining_power).sum(),
            profiles.iter().map(|p| p.forging_power).sum(),
            profiles.iter().map(|p| p.rarity).max().unwrap(),
        );
        prop_assert_eq!(kernel.gem(forged).unwrap().profile(), expected);
        for id in &ids {
            prop_assert_eq!(kernel.owner_of(*id), Err(GemError::NotFound(*id)));
        }
        prop_assert_eq!(kernel.gems_of(&BOB).len(), 1);
    }

    /// Reordering the inputs never changes the numeric outcome.
    #[test]
    fn prop_forge_numbers_are_order_independent(
        profiles in prop::collection::vec(arb_profile(), 2..=5),
        rotate in 0usize..5,
    ) {
        let mut left = test_kernel();
        let mut right = test_kernel();
        let ids = mint_all(&mut left, BOB, &profiles);
        mint_all(&mut right, BOB, &profiles);

        let mut rotated = ids.clone();
        rotated.rotate_left(rotate % ids.len());

        let a = left.forge(&ids, BOB, 0).unwrap();
        let b = right.forge(&rotated, BOB, 0).unwrap();
        prop_assert_eq!(left.gem(a).unwrap().profile(), right.gem(b).unwrap().profile());
    }

    /// An overflowing sum rejects the whole forge; nothing is burned.
    #[test]
    fn prop_overflowing_forge_is_atomic(extra in 1u64..=u64::MAX, count in 2usize..=5) {
        let mut kernel = test_kernel();
        let mut profiles = vec![profile(1, 1, 1, 1); count];
        profiles[0].staked_value = u64::MAX;
        profiles[count - 1].staked_value = extra;
        let ids = mint_all(&mut kernel, BOB, &profiles);
        let before = kernel.state.clone();

        prop_assert_eq!(kernel.forge(&ids, BOB, 0), Err(GemError::Overflow("forged staked value")));
        prop_assert_eq!(&kernel.state, &before);
        prop_assert_eq!(kernel.gems_of(&BOB).len(), count);
    }

    /// A failure at any position leaves every input in place.
    #[test]
    fn prop_failing_element_anywhere_is_atomic(len in 2usize..=5, bad in 0usize..5) {
        let mut kernel = test_kernel();
        let mut ids = mint_all(&mut kernel, BOB, &vec![profile(2, 2, 2, 2); len]);
        let bad = bad % len;
        ids[bad] = 1_000;
        let before = kernel.state.clone();

        prop_assert_eq!(kernel.forge(&ids, BOB, 0), Err(GemError::NotFound(1_000)));
        prop_assert_eq!(&kernel.state, &before);
        prop_assert_eq!(kernel.gems_of(&BOB).len(), len);
    }
}
