//! Error types for the coordinator's real fallibility boundaries:
//! transport construction and replay file I/O. The round loop itself
//! never returns an error for a misbehaving agent — per §7, that's
//! silent rejection, not a `Result`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to spawn agent subprocess: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("agent subprocess exited without stdin/stdout pipes")]
    MissingPipes,
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to open replay file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write replay record: {0}")]
    Write(#[from] std::io::Error),
}
