// Persistence for calculator inputs and saved scenarios
pub mod input_store;
pub mod scenario_store;

pub use input_store::InputSnapshotStore;
pub use scenario_store::{InMemoryScenarioStore, JsonFileScenarioStore, ScenarioStore};

use crate::error::EngineError;
use std::fs;
use std::io::Write;
use std::path::Path;

// Writes to a temp file beside `path` and renames it into place, so a crash
// mid-write never leaves a truncated file behind.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), EngineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut temp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;
    Ok(())
}
