use std::io;
use std::path::PathBuf;

use aedemo::error::DemoError;

/// Failures of the headless runner.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("{0}")]
    Usage(String),
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not determine the config directory")]
    NoConfigDir,
    #[error("output: {0}")]
    Output(#[from] io::Error),
    #[error("snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error(transparent)]
    Demo(#[from] DemoError),
    /// Every tick sender was dropped while a run was still waiting. The
    /// session's own scheduler holds one, so this means it was replaced.
    #[error("tick channel closed before the run finished")]
    TickChannelClosed,
}
