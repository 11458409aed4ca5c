//! The action wire format: the closed set of moves a player may submit in
//! a single tick's reveal.
//!
//! This is a tagged sum type dispatched exhaustively by the tick
//! pipeline, mirroring how the teacher represents its command set. The
//! wire shape is a JSON object tagged by `"type"` (§6.1), so canonical
//! serialization of an `Action` must stay in lock-step with whatever the
//! agent SDK emits.

use serde::{Deserialize, Serialize};

/// The upgradeable stat of a planet (§4.4 step 2, `upgrade`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    Energy,
    Silver,
    Defense,
    Speed,
    Sensor,
}

/// One player move. Exactly one of three shapes; unknown variants fail to
/// deserialize rather than silently matching, so malformed wire payloads
/// are caught before they reach dispatch (§7 class 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Pay energy from the nearest owned planet to reveal everything
    /// within `radius` of `(x, y)`.
    Scan { x: f64, y: f64, radius: f64 },
    /// Launch a fleet carrying `energy` from `from_id` to `to_id`.
    SendFleet {
        from_id: u64,
        to_id: u64,
        energy: f64,
    },
    /// Spend silver to permanently improve one stat of an owned planet.
    Upgrade {
        planet_id: u64,
        upgrade: UpgradeKind,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_round_trips_through_wire_shape() {
        let action = Action::Scan {
            x: 0.1,
            y: -0.2,
            radius: 0.3,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "scan");
        let back: Action = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn send_fleet_round_trips_through_wire_shape() {
        let action = Action::SendFleet {
            from_id: 0,
            to_id: 4,
            energy: 12.5,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "send_fleet");
        assert_eq!(json["from_id"], 0);
        let back: Action = serde_json::from_value(json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn upgrade_variants_round_trip() {
        for kind in [
            UpgradeKind::Energy,
            UpgradeKind::Silver,
            UpgradeKind::Defense,
            UpgradeKind::Speed,
            UpgradeKind::Sensor,
        ] {
            let action = Action::Upgrade {
                planet_id: 2,
                upgrade: kind,
            };
            let json = serde_json::to_value(&action).unwrap();
            assert_eq!(json["type"], "upgrade");
            let back: Action = serde_json::from_value(json).unwrap();
            assert_eq!(back, action);
        }
    }

    #[test]
    fn unknown_variant_fails_to_deserialize() {
        let bad = serde_json::json!({"type": "teleport", "x": 0.0});
        let result: Result<Action, _> = serde_json::from_value(bad);
        assert!(result.is_err());
    }
}
