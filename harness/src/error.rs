use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Device file transfer failure.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("{tool} not found in PATH: {source}")]
    ToolNotFound {
        tool: String,
        #[source]
        source: which::Error,
    },

    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("pull of {remote} failed: {detail}")]
    PullFailed { remote: String, detail: String },
}

/// Cannot materialize the analyzer executable. Fatal to the whole suite.
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("analyzer resource {path} is missing or unreadable: {source}")]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create staging file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("failed to write staged analyzer: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to mark staged analyzer executable: {0}")]
    Permissions(#[source] std::io::Error),
}

/// Cannot pull the device policy. Equally fatal to the whole suite.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("failed to create local policy file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("device pull failed: {0}")]
    Pull(#[from] TransferError),
}

/// What [`crate::StagedContext::stage`] can fail with. Either variant
/// aborts the suite before any rule is evaluated.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("staging failed: {0}")]
    Staging(#[from] StagingError),

    #[error("policy acquisition failed: {0}")]
    Acquisition(#[from] AcquisitionError),
}

/// Analyzer subprocess anomaly: the invocation itself went wrong, as
/// opposed to the analyzer reporting a violation.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("failed to launch analyzer {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for analyzer: {0}")]
    Wait(#[source] std::io::Error),

    #[error("analyzer timed out after {timeout:?} and was killed")]
    TimedOut { timeout: Duration },
}
