//! A `--spectate` demonstration sink: logs each tick's omniscient view
//! instead of broadcasting it over a transport (no HTTP/WebSocket
//! surface is implemented here — see [`openforest_coordinator::SpectatorChannel`]
//! for the interface real transports would adapt).

use async_trait::async_trait;
use openforest_coordinator::{OmniscientObservation, SpectatorChannel};
use tracing::debug;

pub struct LoggingSpectator;

#[async_trait]
impl SpectatorChannel for LoggingSpectator {
    async fn broadcast(&mut self, observation: &OmniscientObservation) {
        debug!(
            tick = observation.tick,
            planets = observation.planets.len(),
            fleets = observation.fleets.len(),
            "spectator frame"
        );
    }
}
