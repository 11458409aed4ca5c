//! The commit-reveal round coordinator (§2 component F) and its
//! supporting transport/wire-protocol/replay types.
//!
//! This crate is where the match's cooperative concurrency lives —
//! per-agent `tokio` tasks with independent phase deadlines — sitting on
//! top of the synchronous, tick-serial [`openforest_engine::Engine`].

pub mod coordinator;
pub mod error;
pub mod protocol;
pub mod replay;
pub mod transport;

pub use coordinator::{Coordinator, Status};
pub use error::{ReplayError, TransportError};
pub use openforest_engine::OmniscientObservation;
pub use protocol::{AgentMessage, ServerMessage};
pub use replay::ReplayWriter;
pub use transport::{
    in_process_pair, in_process_spectator, AgentChannel, InProcessAgentHandle, InProcessChannel,
    InProcessSpectatorChannel, SpectatorChannel, StdioChannel,
};
