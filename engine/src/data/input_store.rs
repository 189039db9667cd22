// Per-calculator input snapshots: one JSON blob per fixed key.
// Each save replaces the whole snapshot, so the last writer wins.
use super::write_atomic;
use crate::error::EngineError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

pub struct InputSnapshotStore {
    dir: PathBuf,
}

impl InputSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        InputSnapshotStore { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    // Ok(None) when nothing has been saved under `key` yet.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, EngineError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    // Missing or unreadable snapshots fall back to `default` and are only logged.
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, default: impl FnOnce() -> T) -> T {
        match self.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Saved inputs could not be read, using defaults");
                default()
            }
        }
    }

    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.load_or(key, T::default)
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), EngineError> {
        let json = serde_json::to_string_pretty(value)?;
        write_atomic(&self.path_for(key), &json)?;
        tracing::debug!(key, "Input snapshot saved");
        Ok(())
    }

    // Returns true if a snapshot existed.
    pub fn clear(&self, key: &str) -> Result<bool, EngineError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}
