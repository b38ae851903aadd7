//! Error types for relay-engine.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use relay_core::CoreError;

/// All errors that can arise from detection and orchestration.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An error from descriptor or ledger handling.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An I/O error while hashing, with annotated path for context.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A module declared an exclusion pattern that is not a valid glob.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// A module command could not be launched (missing executable,
    /// permission denied).
    #[error("command '{command}' failed to start in {}: {source}", .dir.display())]
    Spawn {
        command: String,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A module command ran but exited with a non-zero status.
    #[error("command '{command}' in {} exited with {status}", .dir.display())]
    CommandFailed {
        command: String,
        dir: PathBuf,
        status: ExitStatus,
    },
}

/// Convenience constructor for [`EngineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> EngineError {
    EngineError::Io {
        path: path.into(),
        source,
    }
}
