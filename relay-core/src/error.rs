//! Error types for relay-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from descriptor and ledger operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An I/O failure, with annotated path for context.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — names the offending file.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// No project descriptor at (or above) the expected path.
    #[error("no relay project found at {}; run `relay init` first", .path.display())]
    ProjectNotFound { path: PathBuf },

    /// A module listed in the ledger has no descriptor on disk.
    #[error("module descriptor not found at {}", .path.display())]
    ModuleNotFound { path: PathBuf },

    /// The lock ledger file did not exist at the expected path.
    #[error("lock file not found at {}; run `relay init` first", .path.display())]
    LockNotFound { path: PathBuf },
}

/// Convenience constructor for [`CoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CoreError {
    CoreError::Io {
        path: path.into(),
        source,
    }
}
