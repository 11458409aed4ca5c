//! Per-tick scoring (§4.6). Scores accumulate monotonically; this module
//! only computes and adds this tick's gain, it never resets anything.

use openforest_core::types::{MatchConfig, Planet, PlayerState};

/// Applies one tick of scoring to every player in `players`, in ascending
/// id order (the caller is expected to hold players in a `BTreeMap` or
/// otherwise already-sorted collection).
pub fn apply_scoring<'a>(
    players: impl Iterator<Item = &'a mut PlayerState>,
    planets: &[Planet],
    config: &MatchConfig,
) {
    for player in players {
        let mut owned: Vec<&Planet> = planets.iter().filter(|p| p.owner == Some(player.id)).collect();
        owned.sort_by(|a, b| b.energy_cap.partial_cmp(&a.energy_cap).unwrap());

        let territory_gain: f64 = owned
            .iter()
            .take(config.score_top_n)
            .map(|p| p.energy_cap)
            .sum::<f64>()
            / 1000.0;

        let artifacts_held = owned.iter().filter(|p| p.is_artifact).count() as u32;
        let artifact_gain = artifacts_held as f64 * config.artifact_points_per_tick;

        player.territory_score += territory_gain;
        player.artifact_score += artifact_gain;
        player.artifacts_held = artifacts_held;
        player.score = player.territory_score + player.artifact_score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(owner: Option<u64>, energy_cap: f64, is_artifact: bool) -> Planet {
        Planet {
            id: 0,
            x: 0.0,
            y: 0.0,
            level: 1,
            energy: 0.0,
            energy_cap,
            energy_growth: 0.0,
            silver: 0.0,
            silver_cap: 0.0,
            silver_growth: 0.0,
            defense: 0.0,
            speed: 0.0,
            sensor_range: 0.0,
            owner,
            is_artifact,
        }
    }

    #[test]
    fn scoring_sum_matches_fixture() {
        let planets = vec![
            planet(Some(0), 100.0, false),
            planet(Some(0), 80.0, false),
            planet(Some(0), 60.0, true),
        ];
        let config = MatchConfig {
            score_top_n: 5,
            artifact_points_per_tick: 0.5,
            ..MatchConfig::default()
        };
        let mut player = PlayerState::new(0, "p0");
        apply_scoring(std::iter::once(&mut player), &planets, &config);

        assert!((player.territory_score - 0.24).abs() < 1e-9);
        assert_eq!(player.artifact_score, 0.5);
        assert!((player.score - (0.24 + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn scores_are_monotonically_non_decreasing() {
        let planets = vec![planet(Some(0), 100.0, false)];
        let config = MatchConfig::default();
        let mut player = PlayerState::new(0, "p0");
        apply_scoring(std::iter::once(&mut player), &planets, &config);
        let first = player.score;
        apply_scoring(std::iter::once(&mut player), &planets, &config);
        assert!(player.score >= first);
    }
}
