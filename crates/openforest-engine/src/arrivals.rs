//! Fleet motion and arrival resolution (§4.4 steps 3-4): decrement every
//! fleet's countdown, then resolve everyone who has landed, in ascending
//! fleet-id order so combat outcomes are deterministic regardless of
//! collection order.

use openforest_core::math::clamp;
use openforest_core::types::{Fleet, MatchConfig, Planet};

/// Decrements every fleet's `ticks_remaining` by one.
pub fn advance_fleets(fleets: &mut [Fleet]) {
    for fleet in fleets.iter_mut() {
        fleet.ticks_remaining = fleet.ticks_remaining.saturating_sub(1);
    }
}

/// Combat resolution for one arriving fleet against a hostile planet
/// (§4.4 step 4 / §8 scenarios 1-2).
fn resolve_combat(fleet: &Fleet, dest: &mut Planet, config: &MatchConfig) {
    let defense_factor = 1.0 + dest.defense * config.defense_multiplier;
    let damage = fleet.energy / defense_factor;
    let post_energy = dest.energy - damage;

    if post_energy < dest.energy_cap * config.capture_threshold_fraction {
        dest.owner = Some(fleet.owner);
        dest.energy = clamp((fleet.energy - damage).max(0.0), 0.0, dest.energy_cap);
    } else {
        dest.energy = clamp(post_energy, 0.0, dest.energy_cap);
    }
}

/// Resolves every fleet that has arrived (`ticks_remaining == 0`) against
/// its destination planet, in ascending fleet-id order, then removes
/// arrived fleets from `fleets`.
pub fn resolve_arrivals(fleets: &mut Vec<Fleet>, planets: &mut [Planet], config: &MatchConfig) {
    let mut arrived: Vec<usize> = (0..fleets.len()).filter(|&i| fleets[i].has_arrived()).collect();
    arrived.sort_by_key(|&i| fleets[i].id);

    for i in arrived {
        let fleet = fleets[i].clone();
        let dest = &mut planets[fleet.dest_id as usize];
        if dest.owner.is_none() || dest.owner == Some(fleet.owner) {
            dest.owner = Some(fleet.owner);
            dest.energy = clamp(dest.energy + fleet.energy, 0.0, dest.energy_cap);
        } else {
            resolve_combat(&fleet, dest, config);
        }
    }

    fleets.retain(|f| f.ticks_remaining > 0);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(owner: Option<u64>, energy: f64, energy_cap: f64, defense: f64) -> Planet {
        Planet {
            id: 0,
            x: 0.0,
            y: 0.0,
            level: 1,
            energy,
            energy_cap,
            energy_growth: 0.0,
            silver: 0.0,
            silver_cap: 0.0,
            silver_growth: 0.0,
            defense,
            speed: 1.0,
            sensor_range: 0.0,
            owner,
            is_artifact: false,
        }
    }

    fn fleet(owner: u64, energy: f64) -> Fleet {
        Fleet {
            id: 1,
            owner,
            source_id: 1,
            dest_id: 0,
            energy,
            launch_tick: 0,
            total_ticks: 3,
            ticks_remaining: 0,
        }
    }

    #[test]
    fn capture_by_overwhelming_force() {
        let config = MatchConfig {
            capture_threshold_fraction: 0.15,
            defense_multiplier: 0.2,
            ..MatchConfig::default()
        };
        let mut planets = vec![planet(Some(1), 10.0, 100.0, 1.0)];
        let mut fleets = vec![fleet(0, 50.0)];
        resolve_arrivals(&mut fleets, &mut planets, &config);
        assert_eq!(planets[0].owner, Some(0));
        assert!((planets[0].energy - 8.333333333333334).abs() < 1e-6);
    }

    #[test]
    fn defense_holds() {
        let config = MatchConfig {
            capture_threshold_fraction: 0.15,
            defense_multiplier: 0.2,
            ..MatchConfig::default()
        };
        let mut planets = vec![planet(Some(1), 80.0, 100.0, 2.0)];
        let mut fleets = vec![fleet(0, 30.0)];
        resolve_arrivals(&mut fleets, &mut planets, &config);
        assert_eq!(planets[0].owner, Some(1));
        assert!((planets[0].energy - 58.57142857142857).abs() < 1e-6);
    }

    #[test]
    fn uncontested_landing_transfers_ownership() {
        let config = MatchConfig::default();
        let mut planets = vec![planet(None, 0.0, 100.0, 1.0)];
        let mut fleets = vec![fleet(0, 40.0)];
        resolve_arrivals(&mut fleets, &mut planets, &config);
        assert_eq!(planets[0].owner, Some(0));
        assert_eq!(planets[0].energy, 40.0);
        assert!(fleets.is_empty());
    }

    #[test]
    fn advance_fleets_decrements_remaining() {
        let mut fleets = vec![fleet(0, 1.0)];
        fleets[0].ticks_remaining = 2;
        advance_fleets(&mut fleets);
        assert_eq!(fleets[0].ticks_remaining, 1);
    }
}
