//! The data model: planets, fleets, pings, players, and match configuration.
//!
//! These are plain data structs with no behavior of their own — mutation
//! happens in the tick pipeline (`openforest-engine`), not here. Field
//! names match the wire protocol exactly since every one of these is
//! serialized verbatim into snapshots and observations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Stable planet identity; also its index into the engine's planet vector.
pub type PlanetId = u64;
/// Player identity, assigned in match setup, stable for the whole match.
pub type PlayerId = u64;
/// Monotonically increasing fleet identity, never reused.
pub type FleetId = u64;
/// Monotonically increasing ping identity, never reused.
pub type PingId = u64;

/// A map location. Created once by the world generator and never
/// destroyed; every field past `id`/`x`/`y`/`is_artifact` is mutated only
/// by the tick pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub x: f64,
    pub y: f64,
    pub level: u8,
    pub energy: f64,
    pub energy_cap: f64,
    pub energy_growth: f64,
    pub silver: f64,
    pub silver_cap: f64,
    pub silver_growth: f64,
    pub defense: f64,
    pub speed: f64,
    pub sensor_range: f64,
    pub owner: Option<PlayerId>,
    pub is_artifact: bool,
}

impl Planet {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn is_owned_by(&self, player_id: PlayerId) -> bool {
        self.owner == Some(player_id)
    }
}

/// An in-flight energy shipment between two planets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: FleetId,
    pub owner: PlayerId,
    pub source_id: PlanetId,
    pub dest_id: PlanetId,
    pub energy: f64,
    pub launch_tick: u64,
    pub total_ticks: u64,
    pub ticks_remaining: u64,
}

impl Fleet {
    /// Fraction of the journey completed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        1.0 - (self.ticks_remaining as f64 / self.total_ticks as f64)
    }

    pub fn has_arrived(&self) -> bool {
        self.ticks_remaining == 0
    }
}

/// A decaying geometric event: either a fleet launch leaking position, or
/// a per-tick artifact beacon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ping {
    pub id: PingId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub strength: f64,
    pub source_player: PlayerId,
    pub tick: u64,
    pub ttl: i64,
}

impl Ping {
    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// A cached planet snapshot in a player's fog-of-war memory, tagged with
/// how it was last observed. Stale entries are copies, never live
/// references into the current world state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Owned,
    Visible,
    Stale,
}

/// A planet as seen by one player: all of [`Planet`]'s fields plus a
/// visibility tag and the tick it was last actually seen (as opposed to
/// recalled from cache).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedPlanet {
    #[serde(flatten)]
    pub planet: Planet,
    pub visibility: Visibility,
    pub last_seen_tick: u64,
}

/// Per-player persistent state: identity, accumulated scores, and the
/// fog-of-war memory of every planet this player has ever observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub territory_score: f64,
    pub artifact_score: f64,
    pub score: f64,
    pub artifacts_held: u32,
    #[serde(skip)]
    pub known_planets: HashMap<PlanetId, ObservedPlanet>,
}

impl PlayerState {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            territory_score: 0.0,
            artifact_score: 0.0,
            score: 0.0,
            artifacts_held: 0,
            known_planets: HashMap::new(),
        }
    }
}

/// One row of the per-player score table, as carried in observations and
/// snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: PlayerId,
    pub name: String,
    pub score: f64,
    pub territory_score: f64,
    pub artifact_score: f64,
    pub artifacts_held: u32,
}

impl From<&PlayerState> for ScoreEntry {
    fn from(p: &PlayerState) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            score: p.score,
            territory_score: p.territory_score,
            artifact_score: p.artifact_score,
            artifacts_held: p.artifacts_held,
        }
    }
}

/// Immutable match-wide configuration, loaded once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchConfig {
    pub seed: u64,
    pub tick_ms: u64,
    pub match_ticks: u64,
    pub planet_count: u64,
    pub artifact_count: u64,
    pub max_actions_per_tick: u32,
    pub speed_const: f64,
    pub capture_threshold_fraction: f64,
    pub defense_multiplier: f64,
    pub ping_ttl_ticks: i64,
    pub ping_jitter: f64,
    pub ping_base_radius: f64,
    pub ping_base_strength: f64,
    pub artifact_ping_radius: f64,
    pub artifact_ping_strength: f64,
    pub artifact_points_per_tick: f64,
    pub score_top_n: usize,
    pub commit_timeout_ms: u64,
    pub reveal_timeout_ms: u64,
    pub player_home_min_distance: f64,
}

impl Default for MatchConfig {
    /// Defaults drawn from the end-to-end scenario fixtures: small match,
    /// short timeouts, conservative ping/scoring parameters.
    fn default() -> Self {
        Self {
            seed: 1,
            tick_ms: 500,
            match_ticks: 600,
            planet_count: 10,
            artifact_count: 2,
            max_actions_per_tick: 5,
            speed_const: 0.08,
            capture_threshold_fraction: 0.15,
            defense_multiplier: 0.2,
            ping_ttl_ticks: 3,
            ping_jitter: 0.03,
            ping_base_radius: 0.05,
            ping_base_strength: 0.1,
            artifact_ping_radius: 0.12,
            artifact_ping_strength: 0.2,
            artifact_points_per_tick: 0.5,
            score_top_n: 5,
            commit_timeout_ms: 1500,
            reveal_timeout_ms: 1500,
            player_home_min_distance: 0.5,
        }
    }
}
