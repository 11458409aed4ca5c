//! Deterministic world generation (§4.3): from a seed and a player list to
//! an initial planet field with home planets and artifacts assigned.
//!
//! Every random draw in this module comes from the one `ChaCha8Rng`
//! threaded through by [`generate_world`] — the draw order here is part
//! of the contract, since two engines built from the same seed must
//! produce byte-identical planets.

use openforest_core::levels::{roll_level, stats_for_level};
use openforest_core::math::distance;
use openforest_core::types::{MatchConfig, Planet, PlayerId};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Generates the initial planet field for a match: uniformly scattered
/// planets with rolled levels, then home planets assigned to `player_ids`
/// (in the order given) and artifacts flagged among the rest.
pub fn generate_world(config: &MatchConfig, player_ids: &[PlayerId], rng: &mut ChaCha8Rng) -> Vec<Planet> {
    let mut planets = roll_planets(config, rng);
    assign_homes(&mut planets, player_ids, config.player_home_min_distance, rng);
    assign_artifacts(&mut planets, config.artifact_count as usize, rng);
    planets
}

fn roll_planets(config: &MatchConfig, rng: &mut ChaCha8Rng) -> Vec<Planet> {
    (0..config.planet_count)
        .map(|id| {
            let x = rng.gen_range(-1.0..1.0);
            let y = rng.gen_range(-1.0..1.0);
            let draw = rng.gen_range(0.0..1.0);
            let level = roll_level(draw);
            let stats = stats_for_level(level);
            Planet {
                id,
                x,
                y,
                level,
                energy: stats.energy_cap * 0.5,
                energy_cap: stats.energy_cap,
                energy_growth: stats.energy_growth,
                silver: stats.silver_cap * 0.4,
                silver_cap: stats.silver_cap,
                silver_growth: stats.silver_growth,
                defense: stats.defense,
                speed: stats.speed,
                sensor_range: stats.sensor_range,
                owner: None,
                is_artifact: false,
            }
        })
        .collect()
}

/// Greedily picks one home per player, preferring candidates at least
/// `min_distance` from every home already chosen; if candidates run out
/// before every player has a home, the distance constraint is relaxed and
/// homes are filled from whatever remains of the shuffle order (§4.3 step
/// 3, and the open question in §9 confirming this fallback is intentional).
fn assign_homes(planets: &mut [Planet], player_ids: &[PlayerId], min_distance: f64, rng: &mut ChaCha8Rng) {
    let mut order: Vec<usize> = (0..planets.len()).collect();
    order.shuffle(rng);

    let mut chosen: Vec<usize> = Vec::with_capacity(player_ids.len());
    for &idx in &order {
        if chosen.len() >= player_ids.len() {
            break;
        }
        let candidate = planets[idx].position();
        let far_enough = chosen
            .iter()
            .all(|&c| distance(candidate, planets[c].position()) >= min_distance);
        if far_enough {
            chosen.push(idx);
        }
    }
    if chosen.len() < player_ids.len() {
        for &idx in &order {
            if chosen.len() >= player_ids.len() {
                break;
            }
            if !chosen.contains(&idx) {
                chosen.push(idx);
            }
        }
    }

    for (&player_id, &idx) in player_ids.iter().zip(chosen.iter()) {
        let stats = stats_for_level(3);
        let planet = &mut planets[idx];
        planet.level = 3;
        planet.energy_cap = stats.energy_cap;
        planet.energy_growth = stats.energy_growth;
        planet.silver_cap = stats.silver_cap;
        planet.silver_growth = stats.silver_growth;
        planet.defense = stats.defense;
        planet.speed = stats.speed;
        planet.sensor_range = stats.sensor_range;
        planet.energy = planet.energy_cap * 0.8;
        planet.silver = planet.silver_cap * 0.5;
        planet.owner = Some(player_id);
    }
}

/// Marks `artifact_count` unowned planets as artifacts, biased toward
/// higher level (§4.3 step 5): take the highest-level unowned candidates,
/// shuffle them, then flag the first `artifact_count`.
fn assign_artifacts(planets: &mut [Planet], artifact_count: usize, rng: &mut ChaCha8Rng) {
    if artifact_count == 0 {
        return;
    }
    let mut unowned: Vec<usize> = planets
        .iter()
        .enumerate()
        .filter(|(_, p)| p.owner.is_none())
        .map(|(i, _)| i)
        .collect();
    unowned.sort_by(|&a, &b| planets[b].level.cmp(&planets[a].level));

    let pool_size = (4 * artifact_count).max(artifact_count).min(unowned.len());
    let mut pool: Vec<usize> = unowned[..pool_size].to_vec();
    pool.shuffle(rng);

    for &idx in pool.iter().take(artifact_count) {
        planets[idx].is_artifact = true;
    }
}
