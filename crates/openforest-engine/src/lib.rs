//! The tick-serial simulation engine (§2 component D, §5 "Simulation").
//!
//! [`Engine`] owns every mutable piece of world state — planets, fleets,
//! pings, and per-player score/cache state — and advances it one tick at a
//! time through the fixed pipeline order of §4.4. Nothing outside `tick`
//! mutates the world while a tick is in progress; the coordinator crate
//! only ever calls in between ticks.

pub mod action_dispatch;
pub mod arrivals;
pub mod growth;
pub mod observation;
pub mod ping;
pub mod scoring;
pub mod snapshot;
pub mod worldgen;

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use openforest_core::action::Action;
use openforest_core::types::{Fleet, FleetId, MatchConfig, Planet, PingId, PlayerId, PlayerState};

pub use observation::{Observation, ObservedFleet, OmniscientObservation};
pub use snapshot::Snapshot;

/// Owns the whole simulated world for one match and advances it tick by
/// tick. Construct with [`Engine::new`], then call [`Engine::tick`] once
/// per round with that tick's hash-verified action map.
pub struct Engine {
    config: MatchConfig,
    tick: u64,
    planets: Vec<Planet>,
    fleets: Vec<Fleet>,
    pings: Vec<openforest_core::types::Ping>,
    players: BTreeMap<PlayerId, PlayerState>,
    next_fleet_id: FleetId,
    next_ping_id: PingId,
}

impl Engine {
    /// Builds a fresh match: generates the world from `config.seed` and
    /// registers one [`PlayerState`] per `(id, name)` pair, in the order
    /// given (home-planet assignment follows this same order, §4.3 step 3).
    pub fn new(config: MatchConfig, player_names: &[(PlayerId, String)]) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let player_ids: Vec<PlayerId> = player_names.iter().map(|(id, _)| *id).collect();
        let planets = worldgen::generate_world(&config, &player_ids, &mut rng);
        let players = player_names
            .iter()
            .map(|(id, name)| (*id, PlayerState::new(*id, name.clone())))
            .collect();

        Self {
            config,
            tick: 0,
            planets,
            fleets: Vec::new(),
            pings: Vec::new(),
            players,
            next_fleet_id: 1,
            next_ping_id: 1,
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn fleets(&self) -> &[Fleet] {
        &self.fleets
    }

    /// Advances the world by exactly one tick, per the §4.4 pipeline order:
    /// growth, action dispatch, fleet motion, arrival resolution, ping
    /// decay/beacon emission, scoring, snapshot build. The snapshot's
    /// `tick` field is the tick number that was just completed; the
    /// internal counter increments only after the snapshot is built.
    pub fn tick(&mut self, actions_by_player: &BTreeMap<PlayerId, Vec<Action>>) -> Snapshot {
        let completed_tick = self.tick;

        growth::apply_growth(&mut self.planets);

        let scan_reveals = action_dispatch::dispatch_actions(
            &mut self.planets,
            &mut self.fleets,
            &mut self.pings,
            &mut self.next_fleet_id,
            &mut self.next_ping_id,
            &self.config,
            completed_tick,
            actions_by_player,
        );

        arrivals::advance_fleets(&mut self.fleets);
        arrivals::resolve_arrivals(&mut self.fleets, &mut self.planets, &self.config);

        ping::decay_pings(&mut self.pings);
        ping::emit_artifact_beacons(
            &self.planets,
            &self.config,
            completed_tick,
            &mut self.next_ping_id,
            &mut self.pings,
        );

        scoring::apply_scoring(self.players.values_mut(), &self.planets, &self.config);

        let snapshot = snapshot::build_snapshot(
            completed_tick,
            &self.planets,
            &self.fleets,
            &self.pings,
            &self.players,
            scan_reveals,
        );

        self.tick += 1;
        snapshot
    }

    /// Builds the fog-of-war observation for one player, given the
    /// scan-reveal ids that player's `scan` actions produced this tick
    /// (from the most recent [`Snapshot::scan_reveals`]). Refreshes that
    /// player's known-planets cache in place (§4.8).
    pub fn observe(&mut self, player_id: PlayerId, scan_reveal_ids: &[u64]) -> Observation {
        let mut player = self
            .players
            .get(&player_id)
            .cloned()
            .unwrap_or_else(|| PlayerState::new(player_id, String::new()));

        let obs = observation::observe(
            &mut player,
            self.tick,
            &self.planets,
            &self.fleets,
            &self.pings,
            &self.players,
            scan_reveal_ids,
            self.config.max_actions_per_tick,
            self.config.match_ticks,
            self.config.tick_ms,
        );

        self.players.insert(player_id, player);
        obs
    }

    /// Builds the unfiltered spectator view (§4.8 "Omniscient observation").
    pub fn observe_omniscient(&self) -> OmniscientObservation {
        observation::observe_omniscient(self.tick, &self.planets, &self.fleets, &self.pings, &self.players)
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.keys().copied()
    }

    pub fn is_complete(&self) -> bool {
        self.tick >= self.config.match_ticks
    }
}
