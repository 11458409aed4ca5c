//! Replay persistence (§6.3): an append-only, one-JSON-object-per-line
//! sink. Spec.md treats the sink as out of scope "by record format", but
//! a reference writer is small enough to carry as ambient I/O — grounded
//! in the original `server/replay.py`'s `ReplayLogger`, which opens the
//! file once, appends one flushed line per tick, and closes on drop.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use openforest_core::action::Action;
use openforest_core::types::PlayerId;
use openforest_engine::{Observation, Snapshot};
use serde::Serialize;

use crate::error::ReplayError;

/// One line of the replay file (§6.3): the completed tick's authoritative
/// snapshot, every player's observation of it, and the actions that
/// produced it.
#[derive(Debug, Serialize)]
pub struct ReplayRecord<'a> {
    pub tick: u64,
    pub state: &'a Snapshot,
    pub observations: &'a BTreeMap<PlayerId, Observation>,
    pub actions: &'a BTreeMap<PlayerId, Vec<Action>>,
}

/// Append-only JSONL replay writer. One instance per match.
pub struct ReplayWriter {
    file: BufWriter<File>,
}

impl ReplayWriter {
    /// Opens (truncating) the replay file at `path`, creating parent
    /// directories as needed.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ReplayError::Open {
                    path: path.display().to_string(),
                    source,
                })?;
            }
        }
        let file = File::create(path).map_err(|source| ReplayError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }

    /// Writes one tick's record, flushing immediately so a crash mid-match
    /// loses at most the in-flight tick.
    pub fn log_tick(
        &mut self,
        tick: u64,
        state: &Snapshot,
        observations: &BTreeMap<PlayerId, Observation>,
        actions: &BTreeMap<PlayerId, Vec<Action>>,
    ) -> Result<(), ReplayError> {
        let record = ReplayRecord {
            tick,
            state,
            observations,
            actions,
        };
        let line = openforest_core::math::canonical_json(&record);
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};

    #[test]
    fn log_tick_appends_one_flushed_line() {
        let dir = std::env::temp_dir().join(format!("openforest-replay-test-{}", std::process::id()));
        let path = dir.join("match.jsonl");

        let mut writer = ReplayWriter::create(&path).unwrap();
        let snapshot = Snapshot {
            tick: 0,
            planets: vec![],
            fleets: vec![],
            pings: vec![],
            scores: vec![],
            scan_reveals: BTreeMap::new(),
        };
        let observations = BTreeMap::new();
        let actions = BTreeMap::new();
        writer.log_tick(0, &snapshot, &observations, &actions).unwrap();
        writer.log_tick(1, &snapshot, &observations, &actions).unwrap();

        let file = File::open(&path).unwrap();
        let lines: Vec<String> = BufReader::new(file).lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"tick\":0"));
        assert!(lines[1].contains("\"tick\":1"));

        let _ = fs::remove_dir_all(&dir);
    }
}
