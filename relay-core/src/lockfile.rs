//! Lock ledger persistence.
//!
//! The ledger (`relay.lock`) is the only mutable state the engine owns. It is
//! loaded fresh at the start of an invocation, mutated in memory, and written
//! back exactly once. Saves rewrite the whole file through a `.tmp` sibling
//! followed by a rename, so a crash mid-write can never leave a truncated
//! ledger behind.
//!
//! There is no cross-invocation locking: concurrent invocations against the
//! same repository race on this file (last writer wins) and are unsupported.

use std::path::Path;

use crate::descriptor::write_atomic;
use crate::error::{io_err, CoreError};
use crate::types::LockFile;

/// File name of the lock ledger at the repository root.
pub const LOCK_FILE: &str = "relay.lock";

/// Load `<root>/relay.lock`.
///
/// Returns `CoreError::LockNotFound` if the repository has never been
/// initialized, `CoreError::Parse` (with path) on malformed content.
pub fn load_lock(root: &Path) -> Result<LockFile, CoreError> {
    let path = root.join(LOCK_FILE);
    if !path.is_file() {
        return Err(CoreError::LockNotFound { path });
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse { path, source: e })
}

/// Serialize the entire in-memory ledger and persist it atomically.
pub fn save_lock(root: &Path, lock: &LockFile) -> Result<(), CoreError> {
    let path = root.join(LOCK_FILE);
    let yaml = serde_yaml::to_string(lock)?;
    write_atomic(&path, &yaml)
}
