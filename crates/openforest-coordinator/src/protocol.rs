//! The agent wire protocol (§6.1): one request/response pair per phase,
//! per tick. These are the types an [`crate::transport::AgentChannel`]
//! sends and receives; the shapes are exactly what §6.1 specifies, tagged
//! by `"type"`.

use openforest_core::action::Action;
use openforest_engine::Observation;
use serde::{Deserialize, Serialize};

/// Server → agent, commit phase (§6.1).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Commit { tick: u64, observation: Observation },
    Reveal { tick: u64 },
}

/// Agent → server, either phase (§6.1). Deserialization failure (wrong
/// `type`, missing fields, wrong field types) is itself a class-1 error
/// per §7 and is handled by the caller, not here.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentMessage {
    Commit { tick: u64, commit: String },
    Reveal { tick: u64, actions: Vec<Action>, nonce: String },
}
