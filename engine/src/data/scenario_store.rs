// Saved scenarios used by the planner. Records are inserted or deleted,
// never updated in place.
use super::write_atomic;
use crate::error::EngineError;
use shared::models::Scenario;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

pub trait ScenarioStore {
    fn save(&mut self, scenario: Scenario) -> Result<(), EngineError>;
    // Insertion order
    fn load_all(&self) -> Result<Vec<Scenario>, EngineError>;
    // Returns the removed record
    fn delete(&mut self, id: Uuid) -> Result<Scenario, EngineError>;
}

fn insert(scenarios: &mut Vec<Scenario>, scenario: Scenario) -> Result<(), EngineError> {
    if scenarios.iter().any(|s| s.id() == scenario.id()) {
        return Err(EngineError::DuplicateScenario(scenario.id()));
    }
    scenarios.push(scenario);
    Ok(())
}

fn remove(scenarios: &mut Vec<Scenario>, id: Uuid) -> Result<Scenario, EngineError> {
    let pos = scenarios
        .iter()
        .position(|s| s.id() == id)
        .ok_or(EngineError::ScenarioNotFound(id))?;
    Ok(scenarios.remove(pos))
}

#[derive(Default)]
pub struct InMemoryScenarioStore {
    scenarios: Vec<Scenario>,
}

impl InMemoryScenarioStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScenarioStore for InMemoryScenarioStore {
    fn save(&mut self, scenario: Scenario) -> Result<(), EngineError> {
        insert(&mut self.scenarios, scenario)
    }

    fn load_all(&self) -> Result<Vec<Scenario>, EngineError> {
        Ok(self.scenarios.clone())
    }

    fn delete(&mut self, id: Uuid) -> Result<Scenario, EngineError> {
        remove(&mut self.scenarios, id)
    }
}

// All scenarios in one JSON array file, re-read on every operation.
pub struct JsonFileScenarioStore {
    path: PathBuf,
}

impl JsonFileScenarioStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileScenarioStore { path: path.into() }
    }

    fn read(&self) -> Result<Option<Result<Vec<Scenario>, serde_json::Error>>, EngineError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)))
    }

    // Writes go through this, so a file that no longer parses is never
    // replaced by a list that silently dropped its records.
    fn load_for_write(&self) -> Result<Vec<Scenario>, EngineError> {
        match self.read()? {
            None => Ok(Vec::new()),
            Some(Ok(scenarios)) => Ok(scenarios),
            Some(Err(e)) => Err(EngineError::StoreError(format!(
                "{} is corrupt ({}); refusing to overwrite it",
                self.path.display(),
                e
            ))),
        }
    }

    fn write_all(&self, scenarios: &[Scenario]) -> Result<(), EngineError> {
        write_atomic(&self.path, &serde_json::to_string_pretty(scenarios)?)
    }
}

impl ScenarioStore for JsonFileScenarioStore {
    fn save(&mut self, scenario: Scenario) -> Result<(), EngineError> {
        let mut scenarios = self.load_for_write()?;
        let id = scenario.id();
        insert(&mut scenarios, scenario)?;
        self.write_all(&scenarios)?;
        tracing::info!(%id, count = scenarios.len(), "Scenario saved");
        Ok(())
    }

    // A corrupt file reads as an empty list rather than an error. Saving or
    // deleting against it fails until the file is repaired or removed.
    fn load_all(&self) -> Result<Vec<Scenario>, EngineError> {
        match self.read()? {
            None => Ok(Vec::new()),
            Some(Ok(scenarios)) => Ok(scenarios),
            Some(Err(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Scenario file is corrupt, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn delete(&mut self, id: Uuid) -> Result<Scenario, EngineError> {
        let mut scenarios = self.load_for_write()?;
        let removed = remove(&mut scenarios, id)?;
        self.write_all(&scenarios)?;
        tracing::info!(%id, "Scenario deleted");
        Ok(removed)
    }
}
