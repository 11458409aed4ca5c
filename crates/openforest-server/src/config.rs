//! Config loading (§6.2's `MatchConfig`, read from a JSON file at
//! startup), grounded in the reference runner's `load_config`.

use std::fs;
use std::path::Path;

use openforest_core::types::MatchConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads a [`MatchConfig`] from `path`, or returns the built-in defaults
/// if `path` is `None` (§6.2 default fixture values).
pub fn load(path: Option<&Path>) -> Result<MatchConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(MatchConfig::default());
    };
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}
