//! The built-in passive in-process agent: commits to an empty action
//! list every tick. Seats any player a `--bot` subprocess wasn't given,
//! so the server is runnable standalone without spawning anything. This
//! is wiring, not a bot strategy — no targeting or upgrade policy is
//! implemented here (that's the subprocess bots' job, out of scope for
//! the server itself).

use openforest_core::action::Action;
use openforest_core::math::{canonical_json, sha256_hex};
use openforest_coordinator::{in_process_pair, AgentChannel, AgentMessage, InProcessAgentHandle, ServerMessage};

/// Spawns the passive agent's task and returns the [`AgentChannel`] half
/// the coordinator drives.
pub fn spawn_passive_agent(buffer: usize) -> Box<dyn AgentChannel> {
    let (channel, handle) = in_process_pair(buffer);
    tokio::spawn(run_passive_agent(handle));
    Box::new(channel)
}

async fn run_passive_agent(mut handle: InProcessAgentHandle) {
    let actions: Vec<Action> = Vec::new();
    let nonce = "passive".to_string();
    let commit = sha256_hex(&(canonical_json(&actions) + &nonce));

    while let Some(msg) = handle.from_server.recv().await {
        let reply = match msg {
            ServerMessage::Commit { tick, .. } => AgentMessage::Commit {
                tick,
                commit: commit.clone(),
            },
            ServerMessage::Reveal { tick } => AgentMessage::Reveal {
                tick,
                actions: actions.clone(),
                nonce: nonce.clone(),
            },
        };
        if handle.to_server.send(reply).await.is_err() {
            return;
        }
    }
}
