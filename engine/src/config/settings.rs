// Engine settings, loaded from a JSON file with environment overrides.
use crate::error::EngineError;
use crate::funnel::RatePolicy;
use crate::planner::PlannerWeights;
use serde::Deserialize;
use shared::models::Currency;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "roi-suite.json";
pub const DATA_DIR_ENV: &str = "ROI_SUITE_DATA_DIR";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    // Holds input snapshots and the saved scenario list
    pub data_dir: PathBuf,
    // Currency for a calculator that has no saved inputs yet
    pub default_currency: Currency,
    pub rate_policy: RatePolicy,
    pub planner_weights: PlannerWeights,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            data_dir: PathBuf::from(".roi-suite"),
            default_currency: Currency::USD,
            rate_policy: RatePolicy::Permissive,
            planner_weights: PlannerWeights::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EngineError::ConfigError(format!("Failed to read '{}': {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings in '{}': {}", path.display(), e)))
    }

    // An explicit path must exist. Without one, `roi-suite.json` in the
    // working directory is used when present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, EngineError> {
        let settings = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)?
                } else {
                    tracing::debug!("No settings file found, using defaults");
                    Self::default()
                }
            }
        };
        Ok(settings.with_env_overrides(|key| std::env::var(key).ok()))
    }

    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            tracing::debug!(data_dir = %dir, "Data directory overridden from environment");
            self.data_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn scenarios_path(&self) -> PathBuf {
        self.data_dir.join("scenarios.json")
    }

    pub fn inputs_dir(&self) -> PathBuf {
        self.data_dir.join("inputs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "default_currency": "EUR", "rate_policy": "clamp" }}"#).unwrap();
        let settings = EngineSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.default_currency, Currency::EUR);
        assert_eq!(settings.rate_policy, RatePolicy::Clamp);
        assert_eq!(settings.data_dir, PathBuf::from(".roi-suite"));
        assert_eq!(settings.planner_weights, PlannerWeights::default());
    }

    #[test]
    fn test_unknown_keys_are_a_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "dataDirectory": "/tmp" }}"#).unwrap();
        let err = EngineSettings::from_file(file.path()).unwrap_err();
        assert!(matches!(err, EngineError::ConfigError(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = EngineSettings::load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_env_override_and_paths() {
        let settings = EngineSettings::default()
            .with_env_overrides(|key| (key == DATA_DIR_ENV).then(|| "/var/lib/roi".to_string()));
        assert_eq!(settings.data_dir, PathBuf::from("/var/lib/roi"));
        assert_eq!(settings.scenarios_path(), PathBuf::from("/var/lib/roi/scenarios.json"));
        assert_eq!(settings.inputs_dir(), PathBuf::from("/var/lib/roi/inputs"));

        let untouched = EngineSettings::default().with_env_overrides(|_| Some("  ".to_string()));
        assert_eq!(untouched.data_dir, PathBuf::from(".roi-suite"));
    }
}
