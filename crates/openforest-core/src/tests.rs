//! Cross-module sanity checks that don't belong to any single file.

use crate::action::{Action, UpgradeKind};
use crate::math::canonical_json;
use crate::types::MatchConfig;

#[test]
fn match_config_round_trips_as_json() {
    let cfg = MatchConfig::default();
    let s = serde_json::to_string(&cfg).unwrap();
    let back: MatchConfig = serde_json::from_str(&s).unwrap();
    assert_eq!(back.seed, cfg.seed);
    assert_eq!(back.planet_count, cfg.planet_count);
}

#[test]
fn canonical_json_of_actions_is_order_independent_of_field_order() {
    // Two actions built with the same values must canonicalize identically
    // regardless of how the struct fields were written, since commit
    // hashing depends on this (§9's canonical-JSON note).
    let a = Action::SendFleet {
        from_id: 1,
        to_id: 2,
        energy: 5.0,
    };
    let b = Action::SendFleet {
        energy: 5.0,
        to_id: 2,
        from_id: 1,
    };
    assert_eq!(canonical_json(&a), canonical_json(&b));
}

#[test]
fn canonical_json_of_action_list_matches_expected_shape() {
    let actions = vec![
        Action::Scan {
            x: 0.0,
            y: 0.0,
            radius: 0.2,
        },
        Action::Upgrade {
            planet_id: 0,
            upgrade: UpgradeKind::Energy,
        },
    ];
    let s = canonical_json(&actions);
    assert_eq!(
        s,
        r#"[{"radius":0.2,"type":"scan","x":0.0,"y":0.0},{"planet_id":0,"type":"upgrade","upgrade":"energy"}]"#
    );
}
