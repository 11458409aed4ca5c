//! Ping construction (§4.5): fleet-launch pings leak a jittered position
//! derived from an independently keyed PRNG, so they're reproducible even
//! if the engine's main world-gen stream has diverged.

use openforest_core::math::deterministic_rng;
use openforest_core::types::{MatchConfig, Fleet, Planet, Ping, PingId};
use rand::Rng;

/// Builds the ping emitted when `fleet` launches from `source`, using a
/// PRNG keyed by `(config.seed, "ping", tick, fleet.id)` independent of
/// any other random draw in the system.
pub fn fleet_launch_ping(config: &MatchConfig, source: &Planet, fleet: &Fleet, tick: u64, id: PingId) -> Ping {
    let parts = vec!["ping".to_string(), tick.to_string(), fleet.id.to_string()];
    let mut rng = deterministic_rng(config.seed, &parts);

    let jitter_x = rng.gen_range(-config.ping_jitter..config.ping_jitter);
    let jitter_y = rng.gen_range(-config.ping_jitter..config.ping_jitter);

    let mut radius = config.ping_base_radius + 0.01 * fleet.energy.sqrt();
    let mut strength = config.ping_base_strength + 0.02 * fleet.energy.sqrt();
    if source.is_artifact {
        radius += 0.5 * config.artifact_ping_radius;
        strength += 0.8 * config.artifact_ping_strength;
    }

    Ping {
        id,
        x: source.x + jitter_x,
        y: source.y + jitter_y,
        radius,
        strength,
        source_player: fleet.owner,
        tick,
        ttl: config.ping_ttl_ticks,
    }
}

/// Builds the per-tick beacon emitted by an owned artifact planet (§4.4
/// step 6): a one-tick ping at the planet's exact position.
pub fn artifact_beacon(config: &MatchConfig, planet: &Planet, tick: u64, id: PingId) -> Ping {
    Ping {
        id,
        x: planet.x,
        y: planet.y,
        radius: config.artifact_ping_radius,
        strength: config.artifact_ping_strength,
        source_player: planet.owner.expect("artifact beacons only emit for owned planets"),
        tick,
        ttl: 1,
    }
}

/// Decrements every ping's ttl, dropping those that have expired (§4.4
/// step 5).
pub fn decay_pings(pings: &mut Vec<Ping>) {
    for ping in pings.iter_mut() {
        ping.ttl -= 1;
    }
    pings.retain(|p| p.ttl > 0);
}

/// Emits one beacon per owned artifact planet (§4.4 step 6).
pub fn emit_artifact_beacons(planets: &[Planet], config: &MatchConfig, tick: u64, next_ping_id: &mut PingId, pings: &mut Vec<Ping>) {
    for planet in planets.iter().filter(|p| p.is_artifact && p.owner.is_some()) {
        let id = *next_ping_id;
        *next_ping_id += 1;
        pings.push(artifact_beacon(config, planet, tick, id));
    }
}
