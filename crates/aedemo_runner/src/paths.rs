//! Cross-platform runner paths

use std::path::PathBuf;

use crate::error::RunnerError;

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Result<Self, RunnerError> {
        let base = dirs::config_dir().ok_or(RunnerError::NoConfigDir)?;
        Ok(Self {
            config_dir: base.join("aedemo"),
        })
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("runner.json")
    }
}
