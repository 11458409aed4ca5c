//! Snapshot construction (§4.4 step 8): the complete, unfiltered per-tick
//! state handed to the coordinator for persistence and re-projection.
//!
//! Building a snapshot is a pure, read-only operation over the engine's
//! state — it never mutates anything, mirroring how the teacher keeps
//! snapshot assembly separate from the systems that actually advance the
//! simulation.

use std::collections::BTreeMap;

use openforest_core::types::{Fleet, Planet, PlanetId, PlayerId, PlayerState, Ping, ScoreEntry};
use serde::{Deserialize, Serialize};

use crate::observation::ObservedFleet;

fn interpolate(fleet: &Fleet, planets: &[Planet]) -> (f64, f64) {
    let source = planets[fleet.source_id as usize].position();
    let dest = planets[fleet.dest_id as usize].position();
    let progress = fleet.progress();
    (
        source.0 + progress * (dest.0 - source.0),
        source.1 + progress * (dest.1 - source.1),
    )
}

/// The authoritative, unfiltered world state as of the tick just
/// completed (the increment to the next tick number happens after this is
/// built — see the note at the end of §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub planets: Vec<Planet>,
    pub fleets: Vec<ObservedFleet>,
    pub pings: Vec<Ping>,
    pub scores: Vec<ScoreEntry>,
    pub scan_reveals: BTreeMap<PlayerId, Vec<PlanetId>>,
}

pub fn build_snapshot(
    tick: u64,
    planets: &[Planet],
    fleets: &[Fleet],
    pings: &[Ping],
    players: &BTreeMap<PlayerId, PlayerState>,
    scan_reveals: BTreeMap<PlayerId, Vec<PlanetId>>,
) -> Snapshot {
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

    Snapshot {
        tick,
        planets: planets.to_vec(),
        fleets: observed_fleets,
        pings: pings.to_vec(),
        scores: players.values().map(ScoreEntry::from).collect(),
        scan_reveals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_carries_tick_number_unincremented() {
        let planets = vec![];
        let fleets = vec![];
        let pings = vec![];
        let players = BTreeMap::new();
        let snap = build_snapshot(7, &planets, &fleets, &pings, &players, BTreeMap::new());
        assert_eq!(snap.tick, 7);
    }
}
