//! The commit-reveal round coordinator (§4.7): a tick-synchronous
//! scheduler sitting between the transport layer and the engine. Owns
//! only ephemeral per-tick state (pending commits, in-flight futures);
//! the world itself belongs to [`openforest_engine::Engine`].

use std::collections::BTreeMap;
use std::time::Duration;

use futures::future::join_all;
use openforest_core::action::Action;
use openforest_core::math::{canonical_json, sha256_hex};
use openforest_core::types::{MatchConfig, PlayerId};
use openforest_engine::{Engine, Observation, Snapshot};
use tracing::{debug, warn};

use crate::transport::{AgentChannel, SpectatorChannel};

/// Read-only progress snapshot of the round loop, grounded in the
/// reference server's `/status` handler.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Status {
    pub tick: u64,
    pub match_ticks: u64,
    pub player_ids: Vec<PlayerId>,
}

/// Drives one match to completion: for every tick, collects commitments,
/// collects and verifies reveals, and hands the surviving action map to
/// the engine (§4.7 steps 1-5).
pub struct Coordinator {
    engine: Engine,
    channels: BTreeMap<PlayerId, Box<dyn AgentChannel>>,
    spectators: Vec<Box<dyn SpectatorChannel>>,
}

impl Coordinator {
    pub fn new(engine: Engine, channels: BTreeMap<PlayerId, Box<dyn AgentChannel>>) -> Self {
        Self {
            engine,
            channels,
            spectators: Vec::new(),
        }
    }

    /// Registers a spectator sink (§4.8 supplemented feature): every
    /// subsequent tick's omniscient view is pushed to it after the
    /// engine advances. Spectators never affect the round loop itself.
    pub fn add_spectator(&mut self, spectator: Box<dyn SpectatorChannel>) {
        self.spectators.push(spectator);
    }

    pub fn status(&self) -> Status {
        Status {
            tick: self.engine.current_tick(),
            match_ticks: self.engine.config().match_ticks,
            player_ids: self.engine.player_ids().collect(),
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Runs every remaining tick of the match, calling `on_tick` after
    /// each completed round with the resulting snapshot, the per-player
    /// observations it was computed from, and the verified action map
    /// that produced it. Returns once `match_ticks` rounds have completed
    /// (§4.7: "For each of `config.match_ticks` rounds").
    pub async fn run_match<F>(&mut self, mut on_tick: F)
    where
        F: FnMut(&Snapshot, &BTreeMap<PlayerId, Observation>, &BTreeMap<PlayerId, Vec<Action>>),
    {
        let match_ticks = self.engine.config().match_ticks;
        let mut scan_reveals: BTreeMap<PlayerId, Vec<u64>> = BTreeMap::new();

        while self.engine.current_tick() < match_ticks {
            let tick = self.engine.current_tick();
            let observations = self.build_observations(&scan_reveals);

            let actions_by_player = self.run_round(tick, &observations).await;

            let snapshot = self.engine.tick(&actions_by_player);
            scan_reveals = snapshot.scan_reveals.clone();

            if !self.spectators.is_empty() {
                let omniscient = self.engine.observe_omniscient();
                for spectator in &mut self.spectators {
                    spectator.broadcast(&omniscient).await;
                }
            }

            on_tick(&snapshot, &observations, &actions_by_player);
        }
    }

    fn build_observations(&mut self, scan_reveals: &BTreeMap<PlayerId, Vec<u64>>) -> BTreeMap<PlayerId, Observation> {
        let ids: Vec<PlayerId> = self.engine.player_ids().collect();
        ids.into_iter()
            .map(|id| {
                let reveals = scan_reveals.get(&id).map(Vec::as_slice).unwrap_or(&[]);
                (id, self.engine.observe(id, reveals))
            })
            .collect()
    }

    /// Runs the commit and reveal phases for one tick and returns the
    /// hash-verified action map (§4.7 steps 2-4).
    async fn run_round(
        &mut self,
        tick: u64,
        observations: &BTreeMap<PlayerId, Observation>,
    ) -> BTreeMap<PlayerId, Vec<Action>> {
        let config = self.engine.config().clone();
        let pending_commits = self.commit_phase(tick, observations, &config).await;
        self.reveal_phase(tick, pending_commits, &config).await
    }

    /// Commit phase (§4.7 step 2): concurrently send every live agent its
    /// observation and await a commit hash, bounded by
    /// `commit_timeout_ms`. Pending commits are cleared at the start of
    /// every call — no carry-over across ticks (§5). Timeouts are
    /// independent per agent: one slow agent's future resolving late never
    /// blocks collection of the others' (`join_all` polls every future to
    /// completion, each bounded by its own `timeout`).
    async fn commit_phase(
        &mut self,
        tick: u64,
        observations: &BTreeMap<PlayerId, Observation>,
        config: &MatchConfig,
    ) -> BTreeMap<PlayerId, String> {
        let deadline = Duration::from_millis(config.commit_timeout_ms);

        let futures = self.channels.iter_mut().filter_map(|(&player_id, channel)| {
            let observation = observations.get(&player_id)?;
            Some(async move {
                let result = tokio::time::timeout(deadline, channel.request_commit(tick, observation)).await;
                (player_id, result.ok().flatten())
            })
        });

        let mut pending = BTreeMap::new();
        for (player_id, commit) in join_all(futures).await {
            match commit {
                Some(commit) => {
                    pending.insert(player_id, commit);
                }
                None => debug!(tick, player_id, "commit phase: no submission"),
            }
        }
        pending
    }

    /// Reveal phase (§4.7 steps 3-4): probe every agent with a pending
    /// commit, bounded by `reveal_timeout_ms`, then verify
    /// `sha256_hex(canonical_json(actions) + nonce)` against the pending
    /// commit before accepting. Anything else — timeout, malformed reply,
    /// hash mismatch — is dropped silently (§7).
    async fn reveal_phase(
        &mut self,
        tick: u64,
        pending_commits: BTreeMap<PlayerId, String>,
        config: &MatchConfig,
    ) -> BTreeMap<PlayerId, Vec<Action>> {
        let deadline = Duration::from_millis(config.reveal_timeout_ms);

        let futures = self.channels.iter_mut().filter_map(|(&player_id, channel)| {
            let commit = pending_commits.get(&player_id)?.clone();
            Some(async move {
                let result = tokio::time::timeout(deadline, channel.request_reveal(tick)).await;
                (player_id, result.ok().flatten(), commit)
            })
        });

        let mut actions_by_player = BTreeMap::new();
        for (player_id, reveal, expected_commit) in join_all(futures).await {
            let Some((actions, nonce)) = reveal else {
                debug!(tick, player_id, "reveal phase: no submission");
                continue;
            };
            let observed_commit = sha256_hex(&(canonical_json(&actions) + &nonce));
            if observed_commit == expected_commit {
                actions_by_player.insert(player_id, actions);
            } else {
                warn!(tick, player_id, "reveal phase: commit mismatch, dropping actions");
            }
        }
        actions_by_player
    }
}
