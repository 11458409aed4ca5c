//! Fog-of-war observation projection (§4.8): turns the global world state
//! plus one player's sensor coverage into the filtered view that player's
//! agent actually receives.

use std::collections::{BTreeMap, HashSet};

use openforest_core::math::distance;
use openforest_core::types::{
    Fleet, ObservedPlanet, Planet, PlanetId, Ping, PlayerId, PlayerState, ScoreEntry, Visibility,
};
use serde::{Deserialize, Serialize};

/// One fleet entry as seen by an observer: interpolated position plus
/// everything else the wire format needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservedFleet {
    pub id: u64,
    pub owner: PlayerId,
    pub source_id: PlanetId,
    pub dest_id: PlanetId,
    pub energy: f64,
    pub x: f64,
    pub y: f64,
}

/// The full observation object sent to one agent each tick (§6.2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub tick: u64,
    pub player_id: PlayerId,
    pub planets: Vec<ObservedPlanet>,
    pub fleets: Vec<ObservedFleet>,
    pub pings: Vec<Ping>,
    pub scores: Vec<ScoreEntry>,
    pub max_actions: u32,
    pub match_ticks: u64,
    pub tick_ms: u64,
}

fn interpolate(fleet: &Fleet, planets: &[Planet]) -> (f64, f64) {
    let source = planets[fleet.source_id as usize].position();
    let dest = planets[fleet.dest_id as usize].position();
    let progress = fleet.progress();
    (
        source.0 + progress * (dest.0 - source.0),
        source.1 + progress * (dest.1 - source.1),
    )
}

/// Builds the observation for `player`, given the scan-reveal list this
/// player's `scan` actions produced this tick. Also refreshes `player`'s
/// known-planets cache in place (visible planets overwrite their cache
/// entry; stale ones are read from it, never written).
#[allow(clippy::too_many_arguments)]
pub fn observe(
    player: &mut PlayerState,
    tick: u64,
    planets: &[Planet],
    fleets: &[Fleet],
    pings: &[Ping],
    all_players: &BTreeMap<PlayerId, PlayerState>,
    scan_reveal_ids: &[PlanetId],
    max_actions: u32,
    match_ticks: u64,
    tick_ms: u64,
) -> Observation {
    let owned: Vec<&Planet> = planets.iter().filter(|p| p.is_owned_by(player.id)).collect();

    let mut visible_ids: HashSet<PlanetId> = scan_reveal_ids.iter().copied().collect();
    visible_ids.extend(owned.iter().map(|p| p.id));
    for owner_planet in &owned {
        for candidate in planets {
            if distance(owner_planet.position(), candidate.position()) <= owner_planet.sensor_range {
                visible_ids.insert(candidate.id);
            }
        }
    }

    let mut observed_planets = Vec::with_capacity(planets.len());
    for planet in planets {
        if visible_ids.contains(&planet.id) {
            let visibility = if planet.is_owned_by(player.id) {
                Visibility::Owned
            } else {
                Visibility::Visible
            };
            let entry = ObservedPlanet {
                planet: planet.clone(),
                visibility,
                last_seen_tick: tick,
            };
            player.known_planets.insert(planet.id, entry.clone());
            observed_planets.push(entry);
        } else if let Some(cached) = player.known_planets.get(&planet.id) {
            let mut stale = cached.clone();
            stale.visibility = Visibility::Stale;
            observed_planets.push(stale);
        }
    }

    let observed_fleets: Vec<ObservedFleet> = fleets
        .iter()
        .filter_map(|fleet| {
            let (x, y) = interpolate(fleet, planets);
            let in_range = owned
                .iter()
                .any(|o| distance(o.position(), (x, y)) <= o.sensor_range);
            if !in_range {
                return None;
            }
            Some(ObservedFleet {
                id: fleet.id,
                owner: fleet.owner,
                source_id: fleet.source_id,
                dest_id: fleet.dest_id,
                energy: fleet.energy,
                x,
                y,
            })
        })
        .collect();

    let observed_pings: Vec<Ping> = pings
        .iter()
        .filter(|p| {
            owned
                .iter()
                .any(|o| distance(o.position(), p.position()) <= o.sensor_range)
        })
        .cloned()
        .collect();

    let scores: Vec<ScoreEntry> = all_players.values().map(ScoreEntry::from).collect();

    Observation {
        tick,
        player_id: player.id,
        planets: observed_planets,
        fleets: observed_fleets,
        pings: observed_pings,
        scores,
        max_actions,
        match_ticks,
        tick_ms,
    }
}

/// The unfiltered, whole-map view used for spectators (§4.8, "Omniscient
/// observation"). No sensor filtering, no stale entries, no cache writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmniscientObservation {
    pub tick: u64,
    pub planets: Vec<Planet>,
    pub fleets: Vec<ObservedFleet>,
    pub pings: Vec<Ping>,
    pub scores: Vec<ScoreEntry>,
}

pub fn observe_omniscient(
    tick: u64,
    planets: &[Planet],
    fleets: &[Fleet],
    pings: &[Ping],
    all_players: &BTreeMap<PlayerId, PlayerState>,
) -> OmniscientObservation {
    let observed_fleets = fleets
        .iter()
        .map(|fleet| {
            let (x, y) = interpolate(fleet, planets);
            ObservedFleet {
                id: fleet.id,
                owner: fleet.owner,
                source_id: fleet.source_id,
                dest_id: fleet.dest_id,
                energy: fleet.energy,
                x,
                y,
            }
        })
        .collect();

    OmniscientObservation {
        tick,
        planets: planets.to_vec(),
        fleets: observed_fleets,
        pings: pings.to_vec(),
        scores: all_players.values().map(ScoreEntry::from).collect(),
    }
}
