//! Command-line surface for the local match runner, grounded in the
//! reference runner's `argparse` setup (`runner/run_match.py`). CLI
//! ergonomics are explicitly out of scope for the simulation itself, but
//! a runnable entry point still needs one.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "openforest-server", about = "Runs one Open Forest match to completion")]
pub struct Cli {
    /// Path to a `MatchConfig` JSON file. Falls back to built-in defaults
    /// if omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Overrides `config.seed`.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of players to seat. Ignored once `--bot` is given enough
    /// entries to exceed it.
    #[arg(long, default_value_t = 4)]
    pub players: u64,

    /// Shell command for a player's agent subprocess, speaking the stdio
    /// protocol. May be repeated; one per player in order. Players past
    /// the last `--bot` run the built-in passive in-process agent.
    #[arg(long = "bot")]
    pub bots: Vec<String>,

    /// Where to write the JSONL replay. Defaults to
    /// `replays/match_<unix-seconds>.jsonl`.
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Logs the omniscient spectator view at `debug` every tick, in lieu
    /// of a websocket broadcast (no HTTP/WebSocket surface here).
    #[arg(long, default_value_t = false)]
    pub spectate: bool,
}
