//! Runner configuration, read from JSON.
//!
//! An explicit `--config` path must exist. The default location is optional:
//! when it is missing the reference settings are used.

use std::fs;
use std::io;
use std::path::Path;

use aedemo::config::DemoConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RunnerError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default)]
    pub demo: DemoConfig,
}

impl RunnerConfig {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, RunnerError> {
        serde_json::from_str(text).map_err(|source| RunnerError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path, required: bool) -> Result<Self, RunnerError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let cfg = Self::from_json(path, &text)?;
                info!(path = %path.display(), "config loaded");
                Ok(cfg)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                debug!(path = %path.display(), "no config file; using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(RunnerError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_reference_config() {
        let cfg = RunnerConfig::from_json(Path::new("runner.json"), "{}").unwrap();
        assert_eq!(cfg, RunnerConfig::default());
        assert_eq!(cfg.demo.tick_period_ms, 600);
    }

    #[test]
    fn partial_demo_section_keeps_other_defaults() {
        let cfg = RunnerConfig::from_json(
            Path::new("runner.json"),
            r#"{"demo": {"tick_period_ms": 5, "seed": 9}}"#,
        )
        .unwrap();
        assert_eq!(cfg.demo.tick_period_ms, 5);
        assert_eq!(cfg.demo.seed, 9);
        assert_eq!(cfg.demo.total_epochs, 10);
    }

    #[test]
    fn bad_json_names_the_file() {
        let err = RunnerConfig::from_json(Path::new("bad.json"), "{").unwrap_err();
        assert!(err.to_string().starts_with("invalid config bad.json"));
    }

    #[test]
    fn missing_optional_file_falls_back() {
        let path = std::env::temp_dir().join("aedemo-runner-does-not-exist.json");
        assert_eq!(
            RunnerConfig::load(&path, false).unwrap(),
            RunnerConfig::default()
        );
        assert!(matches!(
            RunnerConfig::load(&path, true),
            Err(RunnerError::Read { .. })
        ));
    }
}
