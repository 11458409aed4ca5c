//! Local match runner binary: loads a [`MatchConfig`], seats one agent
//! per player (a subprocess speaking the stdio protocol, or the
//! built-in passive agent), drives the match to completion, and writes
//! a JSONL replay. Grounded in the reference runner's `run_match.py`
//! and `server/app.py`'s startup wiring, collapsed into a single
//! process since there is no HTTP/WebSocket surface here (§1 non-goal).

mod cli;
mod config;
mod demo_bot;
mod spectator;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use openforest_coordinator::{AgentChannel, Coordinator, ReplayWriter, StdioChannel};
use openforest_engine::Engine;
use openforest_core::types::PlayerId;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();

    let mut match_config = config::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        match_config.seed = seed;
    }

    let player_count = cli.players.max(cli.bots.len() as u64);
    let player_names: Vec<(PlayerId, String)> = (0..player_count).map(|i| (i, format!("Player {i}"))).collect();

    let mut channels: BTreeMap<PlayerId, Box<dyn AgentChannel>> = BTreeMap::new();
    for (player_id, _) in &player_names {
        let channel = match cli.bots.get(*player_id as usize) {
            Some(command_line) => spawn_stdio_bot(command_line)?,
            None => demo_bot::spawn_passive_agent(8),
        };
        channels.insert(*player_id, channel);
    }

    let engine = Engine::new(match_config, &player_names);
    let mut coordinator = Coordinator::new(engine, channels);
    if cli.spectate {
        coordinator.add_spectator(Box::new(spectator::LoggingSpectator));
    }

    let replay_path = cli.replay.unwrap_or_else(default_replay_path);
    let mut replay = ReplayWriter::create(&replay_path)?;

    info!(path = %replay_path.display(), players = player_count, "starting match");

    coordinator
        .run_match(|snapshot, observations, actions| {
            if let Err(err) = replay.log_tick(snapshot.tick, snapshot, observations, actions) {
                tracing::warn!(tick = snapshot.tick, %err, "failed to write replay record");
            }
        })
        .await;

    info!(tick = coordinator.status().tick, "match complete");
    Ok(())
}

/// Spawns a player's agent subprocess from a whitespace-split shell
/// command line, matching the reference runner's one-path-per-bot
/// convention.
fn spawn_stdio_bot(command_line: &str) -> anyhow::Result<Box<dyn AgentChannel>> {
    let mut parts = command_line.split_whitespace();
    let program = parts.next().ok_or_else(|| anyhow::anyhow!("empty --bot command"))?;
    let mut command = tokio::process::Command::new(program);
    command.args(parts);
    Ok(Box::new(StdioChannel::spawn(command)?))
}

fn default_replay_path() -> PathBuf {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    PathBuf::from("replays").join(format!("match_{timestamp}.jsonl"))
}
