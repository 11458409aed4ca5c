//! Property tests for the hashing/canonicalization primitives every
//! other crate's determinism guarantees rest on.

use openforest_core::action::{Action, UpgradeKind};
use openforest_core::math::{canonical_json, deterministic_rng, sha256_hex};
use proptest::prelude::*;
use rand::Rng;

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (-1.0f64..1.0, -1.0f64..1.0, 0.0f64..1.0)
            .prop_map(|(x, y, radius)| Action::Scan { x, y, radius }),
        (0u64..50, 0u64..50, 0.0f64..200.0)
            .prop_map(|(from_id, to_id, energy)| Action::SendFleet { from_id, to_id, energy }),
        (0u64..50).prop_map(|planet_id| Action::Upgrade {
            planet_id,
            upgrade: UpgradeKind::Energy,
        }),
    ]
}

proptest! {
    #[test]
    fn canonical_json_is_a_pure_function_of_value(actions in prop::collection::vec(action_strategy(), 0..8)) {
        let first = canonical_json(&actions);
        let second = canonical_json(&actions);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn commit_hash_changes_if_nonce_changes(actions in prop::collection::vec(action_strategy(), 0..8), nonce_a in "[a-z0-9]{1,16}", nonce_b in "[a-z0-9]{1,16}") {
        prop_assume!(nonce_a != nonce_b);
        let payload = canonical_json(&actions);
        let hash_a = sha256_hex(&(payload.clone() + &nonce_a));
        let hash_b = sha256_hex(&(payload + &nonce_b));
        prop_assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn same_seed_and_parts_always_reproduce_the_same_stream(seed in any::<u64>(), part in "[a-z]{1,8}") {
        let mut rng_a = deterministic_rng(seed, &[part.clone()]);
        let mut rng_b = deterministic_rng(seed, &[part]);
        let draws_a: Vec<u32> = (0..8).map(|_| rng_a.gen()).collect();
        let draws_b: Vec<u32> = (0..8).map(|_| rng_b.gen()).collect();
        prop_assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn different_parts_diverge_the_stream(seed in any::<u64>(), part_a in "[a-z]{1,8}", part_b in "[a-z]{1,8}") {
        prop_assume!(part_a != part_b);
        let mut rng_a = deterministic_rng(seed, &[part_a]);
        let mut rng_b = deterministic_rng(seed, &[part_b]);
        let draw_a: u64 = rng_a.gen();
        let draw_b: u64 = rng_b.gen();
        prop_assert_ne!(draw_a, draw_b);
    }
}
