//! Error type shared by the demo core.

/// Failures the controller reports to its host.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DemoError {
    /// The uploaded text has no non-blank lines, so there is no header to preview.
    #[error("malformed input: no non-blank lines")]
    MalformedInput,
    /// A navigation request named a view outside the fixed set.
    #[error("invalid view: {0:?}")]
    InvalidView(String),
    /// The host could not create the recurring training tick.
    #[error("scheduler: {0}")]
    Scheduler(String),
}

/// Result alias used throughout the crate.
pub type DemoResult<T> = Result<T, DemoError>;
