//! The agent channel contract (§2 component G): an arbitrary bidirectional
//! message carrier the coordinator drives one phase at a time.
//!
//! [`AgentChannel`] only describes "send this, then await a reply of the
//! right shape" — it owns no notion of a deadline. The coordinator wraps
//! every call in [`tokio::time::timeout`] per §4.7/§5: the transport layer
//! owns the queue, the coordinator owns the clock. Two concrete carriers
//! are implemented here: an in-process channel pair (deterministic, used
//! in tests and same-process demos) and a child-process stdio adapter
//! (newline-delimited JSON, grounded in the reference SDK's `stdio.py`).
//! HTTP and WebSocket carriers are left as the interface only, per
//! spec.md's scoping of transport adapters to "arbitrary bidirectional
//! message carriers."

use async_trait::async_trait;
use openforest_core::action::Action;
use openforest_engine::{Observation, OmniscientObservation};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::TransportError;
use crate::protocol::{AgentMessage, ServerMessage};

/// One agent's half of the wire protocol. Every method performs exactly
/// one request/response round trip; any transport error, malformed
/// payload, or tick mismatch collapses to `None` (§7 class 1), never an
/// `Err` — there is nothing for the coordinator to recover from mid-tick.
#[async_trait]
pub trait AgentChannel: Send {
    /// Sends the commit-phase observation and awaits a matching commit
    /// hash.
    async fn request_commit(&mut self, tick: u64, observation: &Observation) -> Option<String>;

    /// Sends the reveal probe and awaits the `(actions, nonce)` pair the
    /// agent claims back its commitment with.
    async fn request_reveal(&mut self, tick: u64) -> Option<(Vec<Action>, String)>;
}

/// An in-memory channel pair, driven by `mpsc` queues, for deterministic
/// tests and in-process demo bots — no serialization round trip needed,
/// though [`InProcessChannel`] still goes through the same
/// [`ServerMessage`]/[`AgentMessage`] types as a real transport would.
pub struct InProcessChannel {
    to_agent: mpsc::Sender<ServerMessage>,
    from_agent: mpsc::Receiver<AgentMessage>,
}

/// The other end of an [`InProcessChannel`] pair: what an in-process bot
/// task reads from and writes to.
pub struct InProcessAgentHandle {
    pub from_server: mpsc::Receiver<ServerMessage>,
    pub to_server: mpsc::Sender<AgentMessage>,
}

/// Builds a connected [`InProcessChannel`]/[`InProcessAgentHandle`] pair.
pub fn in_process_pair(buffer: usize) -> (InProcessChannel, InProcessAgentHandle) {
    let (to_agent, from_server) = mpsc::channel(buffer);
    let (to_server, from_agent) = mpsc::channel(buffer);
    (
        InProcessChannel { to_agent, from_agent },
        InProcessAgentHandle { from_server, to_server },
    )
}

#[async_trait]
impl AgentChannel for InProcessChannel {
    async fn request_commit(&mut self, tick: u64, observation: &Observation) -> Option<String> {
        let msg = ServerMessage::Commit {
            tick,
            observation: observation.clone(),
        };
        self.to_agent.send(msg).await.ok()?;
        match self.from_agent.recv().await? {
            AgentMessage::Commit { tick: t, commit } if t == tick => Some(commit),
            _ => None,
        }
    }

    async fn request_reveal(&mut self, tick: u64) -> Option<(Vec<Action>, String)> {
        self.to_agent.send(ServerMessage::Reveal { tick }).await.ok()?;
        match self.from_agent.recv().await? {
            AgentMessage::Reveal { tick: t, actions, nonce } if t == tick => Some((actions, nonce)),
            _ => None,
        }
    }
}

/// A child-process agent speaking newline-delimited JSON over stdin/
/// stdout, matching the reference SDK's `stdio.py`: one `ServerMessage`
/// line out, one `AgentMessage` line back, per phase.
pub struct StdioChannel {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl StdioChannel {
    /// Spawns `command` with piped stdio and wraps it as an
    /// [`AgentChannel`].
    pub fn spawn(mut command: tokio::process::Command) -> Result<Self, TransportError> {
        command
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped());
        let mut child = command.spawn()?;
        let stdin = child.stdin.take().ok_or(TransportError::MissingPipes)?;
        let stdout = child.stdout.take().ok_or(TransportError::MissingPipes)?;
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    async fn write_line(&mut self, msg: &ServerMessage) -> Option<()> {
        let mut line = serde_json::to_string(msg).ok()?;
        line.push('\n');
        self.stdin.write_all(line.as_bytes()).await.ok()?;
        self.stdin.flush().await.ok()?;
        Some(())
    }

    async fn read_reply(&mut self) -> Option<AgentMessage> {
        let mut line = String::new();
        let n = self.stdout.read_line(&mut line).await.ok()?;
        if n == 0 {
            debug!("agent subprocess closed stdout");
            return None;
        }
        serde_json::from_str(line.trim_end()).ok()
    }
}

impl Drop for StdioChannel {
    fn drop(&mut self) {
        let _ = self.child.start_kill();
    }
}

#[async_trait]
impl AgentChannel for StdioChannel {
    async fn request_commit(&mut self, tick: u64, observation: &Observation) -> Option<String> {
        self.write_line(&ServerMessage::Commit {
            tick,
            observation: observation.clone(),
        })
        .await?;
        match self.read_reply().await? {
            AgentMessage::Commit { tick: t, commit } if t == tick => Some(commit),
            _ => None,
        }
    }

    async fn request_reveal(&mut self, tick: u64) -> Option<(Vec<Action>, String)> {
        self.write_line(&ServerMessage::Reveal { tick }).await?;
        match self.read_reply().await? {
            AgentMessage::Reveal { tick: t, actions, nonce } if t == tick => Some((actions, nonce)),
            _ => None,
        }
    }
}

/// A one-way sink for the omniscient spectator view (§4.8, supplemented
/// feature 1). Shaped like [`AgentChannel`] but push-only — a spectator
/// never talks back, it just receives the whole-map state every tick.
/// Broadcasting never blocks the round loop: a full or disconnected
/// spectator is simply dropped for that tick (same §7 class-1 silence as
/// the agent transports).
#[async_trait]
pub trait SpectatorChannel: Send {
    async fn broadcast(&mut self, observation: &OmniscientObservation);
}

/// An in-process spectator sink backed by an `mpsc` channel — the
/// in-workspace stand-in for the reference server's websocket
/// broadcast, since no HTTP/WebSocket transport is implemented here.
pub struct InProcessSpectatorChannel {
    sender: mpsc::Sender<OmniscientObservation>,
}

pub fn in_process_spectator(buffer: usize) -> (InProcessSpectatorChannel, mpsc::Receiver<OmniscientObservation>) {
    let (sender, receiver) = mpsc::channel(buffer);
    (InProcessSpectatorChannel { sender }, receiver)
}

#[async_trait]
impl SpectatorChannel for InProcessSpectatorChannel {
    async fn broadcast(&mut self, observation: &OmniscientObservation) {
        if self.sender.try_send(observation.clone()).is_err() {
            debug!("spectator channel full or closed, dropping frame");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openforest_core::types::{MatchConfig, PlayerState};

    fn observation() -> Observation {
        let mut player = PlayerState::new(0, "p0");
        openforest_engine::observation::observe(
            &mut player,
            0,
            &[],
            &[],
            &[],
            &std::collections::BTreeMap::new(),
            &[],
            MatchConfig::default().max_actions_per_tick,
            MatchConfig::default().match_ticks,
            MatchConfig::default().tick_ms,
        )
    }

    #[tokio::test]
    async fn in_process_commit_round_trip() {
        let (mut channel, mut handle) = in_process_pair(4);
        let agent_task = tokio::spawn(async move {
            let msg = handle.from_server.recv().await.unwrap();
            let tick = match msg {
                ServerMessage::Commit { tick, .. } => tick,
                _ => panic!("expected commit"),
            };
            handle
                .to_server
                .send(AgentMessage::Commit {
                    tick,
                    commit: "deadbeef".to_string(),
                })
                .await
                .unwrap();
        });

        let obs = observation();
        let commit = channel.request_commit(0, &obs).await;
        agent_task.await.unwrap();
        assert_eq!(commit, Some("deadbeef".to_string()));
    }

    #[tokio::test]
    async fn mismatched_tick_is_rejected() {
        let (mut channel, mut handle) = in_process_pair(4);
        let agent_task = tokio::spawn(async move {
            let _ = handle.from_server.recv().await.unwrap();
            handle
                .to_server
                .send(AgentMessage::Commit {
                    tick: 999,
                    commit: "wrong-tick".to_string(),
                })
                .await
                .unwrap();
        });

        let obs = observation();
        let commit = channel.request_commit(0, &obs).await;
        agent_task.await.unwrap();
        assert_eq!(commit, None);
    }

    #[tokio::test]
    async fn dropped_agent_handle_yields_none() {
        let (mut channel, handle) = in_process_pair(4);
        drop(handle);
        let obs = observation();
        assert_eq!(channel.request_commit(0, &obs).await, None);
    }

    #[tokio::test]
    async fn spectator_receives_broadcast_frames() {
        let (mut spectator, mut receiver) = in_process_spectator(4);
        let frame = OmniscientObservation {
            tick: 3,
            planets: vec![],
            fleets: vec![],
            pings: vec![],
            scores: vec![],
        };
        spectator.broadcast(&frame).await;
        let received = receiver.recv().await.unwrap();
        assert_eq!(received.tick, 3);
    }
}
