//! Action dispatch (§4.4 step 2): applies each player's revealed actions
//! in ascending player-id order, at most `max_actions_per_tick` per
//! player, in submission order. Invalid actions are dropped silently
//! (§7 class 3) — there is no error path out of this function.

use std::collections::BTreeMap;

use openforest_core::action::{Action, UpgradeKind};
use openforest_core::math::{clamp, distance};
use openforest_core::types::{Fleet, FleetId, MatchConfig, Planet, PlanetId, Ping, PingId, PlayerId};

use crate::ping::fleet_launch_ping;

/// Runs action dispatch for every player, returning each player's
/// scan-reveal list (the planet ids their `scan` actions uncovered this
/// tick) for use by the observation projector.
#[allow(clippy::too_many_arguments)]
pub fn dispatch_actions(
    planets: &mut [Planet],
    fleets: &mut Vec<Fleet>,
    pings: &mut Vec<Ping>,
    next_fleet_id: &mut FleetId,
    next_ping_id: &mut PingId,
    config: &MatchConfig,
    tick: u64,
    actions_by_player: &BTreeMap<PlayerId, Vec<Action>>,
) -> BTreeMap<PlayerId, Vec<PlanetId>> {
    let mut scan_reveals: BTreeMap<PlayerId, Vec<PlanetId>> = BTreeMap::new();

    for (&player_id, actions) in actions_by_player.iter() {
        for action in actions.iter().take(config.max_actions_per_tick as usize) {
            match action {
                Action::Scan { x, y, radius } => {
                    dispatch_scan(planets, player_id, *x, *y, *radius, &mut scan_reveals);
                }
                Action::SendFleet {
                    from_id,
                    to_id,
                    energy,
                } => {
                    dispatch_send_fleet(
                        planets,
                        fleets,
                        pings,
                        next_fleet_id,
                        next_ping_id,
                        config,
                        tick,
                        player_id,
                        *from_id,
                        *to_id,
                        *energy,
                    );
                }
                Action::Upgrade { planet_id, upgrade } => {
                    dispatch_upgrade(planets, player_id, *planet_id, *upgrade);
                }
            }
        }
    }

    scan_reveals
}

fn dispatch_scan(
    planets: &mut [Planet],
    player_id: PlayerId,
    x: f64,
    y: f64,
    radius: f64,
    scan_reveals: &mut BTreeMap<PlayerId, Vec<PlanetId>>,
) {
    let nearest = planets
        .iter()
        .filter(|p| p.is_owned_by(player_id))
        .min_by(|a, b| {
            let da = distance((x, y), a.position());
            let db = distance((x, y), b.position());
            da.partial_cmp(&db).unwrap().then(a.id.cmp(&b.id))
        });
    let Some(nearest) = nearest else { return };
    let nearest_id = nearest.id;
    let cost = 8.0 * radius;

    let source = &mut planets[nearest_id as usize];
    if source.energy < cost {
        return;
    }
    source.energy -= cost;

    let revealed: Vec<PlanetId> = planets
        .iter()
        .filter(|p| distance((x, y), p.position()) <= radius)
        .map(|p| p.id)
        .collect();
    scan_reveals.entry(player_id).or_default().extend(revealed);
}

#[allow(clippy::too_many_arguments)]
fn dispatch_send_fleet(
    planets: &mut [Planet],
    fleets: &mut Vec<Fleet>,
    pings: &mut Vec<Ping>,
    next_fleet_id: &mut FleetId,
    next_ping_id: &mut PingId,
    config: &MatchConfig,
    tick: u64,
    player_id: PlayerId,
    from_id: PlanetId,
    to_id: PlanetId,
    energy: f64,
) {
    if from_id == to_id {
        return;
    }
    if from_id as usize >= planets.len() || to_id as usize >= planets.len() {
        return;
    }
    if energy <= 0.0 {
        return;
    }
    let source = &planets[from_id as usize];
    if !source.is_owned_by(player_id) || energy > source.energy {
        return;
    }

    let dist = distance(source.position(), planets[to_id as usize].position());
    let travel_ticks = ((dist / (source.speed * config.speed_const)).ceil() as u64).max(1);

    planets[from_id as usize].energy -= energy;

    let fleet_id = *next_fleet_id;
    *next_fleet_id += 1;
    let fleet = Fleet {
        id: fleet_id,
        owner: player_id,
        source_id: from_id,
        dest_id: to_id,
        energy,
        launch_tick: tick,
        total_ticks: travel_ticks,
        ticks_remaining: travel_ticks,
    };

    let ping_id = *next_ping_id;
    *next_ping_id += 1;
    let ping = fleet_launch_ping(config, &planets[from_id as usize], &fleet, tick, ping_id);
    pings.push(ping);

    fleets.push(fleet);
}

fn dispatch_upgrade(planets: &mut [Planet], player_id: PlayerId, planet_id: PlanetId, upgrade: UpgradeKind) {
    if planet_id as usize >= planets.len() {
        return;
    }
    let planet = &mut planets[planet_id as usize];
    if !planet.is_owned_by(player_id) {
        return;
    }
    let l = planet.level as f64;
    let cost = 15.0 + 12.0 * l;
    if planet.silver < cost {
        return;
    }
    planet.silver -= cost;

    match upgrade {
        UpgradeKind::Energy => {
            planet.energy_cap += 12.0 + 3.0 * l;
            planet.energy_growth += 0.2 + 0.05 * l;
            planet.energy = clamp(planet.energy, 0.0, planet.energy_cap);
        }
        UpgradeKind::Silver => {
            planet.silver_cap += 10.0 + 3.0 * l;
            planet.silver_growth += 0.15 + 0.05 * l;
            planet.silver = clamp(planet.silver, 0.0, planet.silver_cap);
        }
        UpgradeKind::Defense => planet.defense += 0.15 + 0.04 * l,
        UpgradeKind::Speed => planet.speed += 0.04 + 0.01 * l,
        UpgradeKind::Sensor => planet.sensor_range += 0.04 + 0.01 * l,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_planet(id: PlanetId, owner: Option<PlayerId>) -> Planet {
        Planet {
            id,
            x: id as f64 * 0.1,
            y: 0.0,
            level: 2,
            energy: 100.0,
            energy_cap: 120.0,
            energy_growth: 2.2,
            silver: 100.0,
            silver_cap: 90.0,
            silver_growth: 1.3,
            defense: 1.3,
            speed: 0.76,
            sensor_range: 0.3,
            owner,
            is_artifact: false,
        }
    }

    #[test]
    fn send_fleet_rejects_same_source_and_dest() {
        let mut planets = vec![base_planet(0, Some(0))];
        let mut fleets = Vec::new();
        let mut pings = Vec::new();
        let mut next_fleet_id = 1;
        let mut next_ping_id = 1;
        let config = MatchConfig::default();
        let mut actions = BTreeMap::new();
        actions.insert(
            0,
            vec![Action::SendFleet {
                from_id: 0,
                to_id: 0,
                energy: 10.0,
            }],
        );
        dispatch_actions(
            &mut planets,
            &mut fleets,
            &mut pings,
            &mut next_fleet_id,
            &mut next_ping_id,
            &config,
            0,
            &actions,
        );
        assert!(fleets.is_empty());
    }

    #[test]
    fn send_fleet_creates_fleet_and_ping() {
        let mut planets = vec![base_planet(0, Some(0)), base_planet(1, None)];
        let mut fleets = Vec::new();
        let mut pings = Vec::new();
        let mut next_fleet_id = 1;
        let mut next_ping_id = 1;
        let config = MatchConfig::default();
        let mut actions = BTreeMap::new();
        actions.insert(
            0,
            vec![Action::SendFleet {
                from_id: 0,
                to_id: 1,
                energy: 40.0,
            }],
        );
        dispatch_actions(
            &mut planets,
            &mut fleets,
            &mut pings,
            &mut next_fleet_id,
            &mut next_ping_id,
            &config,
            0,
            &actions,
        );
        assert_eq!(fleets.len(), 1);
        assert_eq!(pings.len(), 1);
        assert_eq!(planets[0].energy, 60.0);
    }

    #[test]
    fn upgrade_rejects_insufficient_silver() {
        let mut planets = vec![base_planet(0, Some(0))];
        planets[0].silver = 1.0;
        let mut fleets = Vec::new();
        let mut pings = Vec::new();
        let mut next_fleet_id = 1;
        let mut next_ping_id = 1;
        let config = MatchConfig::default();
        let mut actions = BTreeMap::new();
        actions.insert(
            0,
            vec![Action::Upgrade {
                planet_id: 0,
                upgrade: UpgradeKind::Energy,
            }],
        );
        dispatch_actions(
            &mut planets,
            &mut fleets,
            &mut pings,
            &mut next_fleet_id,
            &mut next_ping_id,
            &config,
            0,
            &actions,
        );
        assert_eq!(planets[0].energy_cap, 120.0);
    }

    #[test]
    fn scan_reveals_planets_in_radius_and_costs_energy() {
        let mut planets = vec![base_planet(0, Some(0)), base_planet(1, None)];
        planets[1].x = 0.05;
        let mut fleets = Vec::new();
        let mut pings = Vec::new();
        let mut next_fleet_id = 1;
        let mut next_ping_id = 1;
        let config = MatchConfig::default();
        let mut actions = BTreeMap::new();
        actions.insert(
            0,
            vec![Action::Scan {
                x: 0.0,
                y: 0.0,
                radius: 0.2,
            }],
        );
        let reveals = dispatch_actions(
            &mut planets,
            &mut fleets,
            &mut pings,
            &mut next_fleet_id,
            &mut next_ping_id,
            &config,
            0,
            &actions,
        );
        assert_eq!(planets[0].energy, 100.0 - 8.0 * 0.2);
        assert!(reveals[&0].contains(&1));
    }
}
