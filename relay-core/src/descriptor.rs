//! Project and module descriptors.
//!
//! # Storage layout
//!
//! ```text
//! <root>/
//!   relay.yml                 (project descriptor — marks the repo root)
//!   relay.lock                (lock ledger — see `lockfile`)
//!   <location>/
//!     module.yml              (one per module directory)
//! ```
//!
//! Every function takes the project root explicitly; the CLI resolves it via
//! [`find_root`]. Descriptors are read fresh on every call — no caching —
//! so re-reading an unchanged file is idempotent.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{io_err, CoreError};
use crate::types::{CommandSet, ModuleFile, ProjectFile};

/// File name of the project descriptor at the repository root.
pub const PROJECT_FILE: &str = "relay.yml";

/// File name of the per-module descriptor.
pub const MODULE_FILE: &str = "module.yml";

// ---------------------------------------------------------------------------
// Root lookup
// ---------------------------------------------------------------------------

/// Walk upward from `start` to the nearest directory containing `relay.yml`.
///
/// Returns `CoreError::ProjectNotFound` (naming `start`) if no ancestor is a
/// relay project.
pub fn find_root(start: &Path) -> Result<PathBuf, CoreError> {
    let mut dir = start;
    loop {
        if dir.join(PROJECT_FILE).is_file() {
            return Ok(dir.to_path_buf());
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(CoreError::ProjectNotFound {
                    path: start.to_path_buf(),
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Project descriptor
// ---------------------------------------------------------------------------

/// Load `<root>/relay.yml`.
///
/// Returns `CoreError::ProjectNotFound` if absent, `CoreError::Parse` (with
/// the file path) if malformed.
pub fn load_project(root: &Path) -> Result<ProjectFile, CoreError> {
    let path = root.join(PROJECT_FILE);
    if !path.is_file() {
        return Err(CoreError::ProjectNotFound { path });
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse { path, source: e })
}

/// Create `<root>/relay.yml` with the given project name.
///
/// Idempotent: if the descriptor already exists, loads and returns it
/// unchanged. Does not create the lock ledger; `relay init` does that
/// separately via `lockfile::save_lock`.
pub fn init_project(root: &Path, name: &str) -> Result<ProjectFile, CoreError> {
    let path = root.join(PROJECT_FILE);
    if path.is_file() {
        return load_project(root);
    }

    let project = ProjectFile {
        name: name.to_string(),
        created_at: Utc::now(),
    };
    let yaml = serde_yaml::to_string(&project)?;
    write_atomic(&path, &yaml)?;
    Ok(project)
}

// ---------------------------------------------------------------------------
// Module descriptors
// ---------------------------------------------------------------------------

/// Load `<root>/<location>/module.yml` and stamp `location` into the result.
///
/// Returns `CoreError::ModuleNotFound` if absent — a ledger entry whose
/// descriptor is gone is a hard error at the call sites, never a silent skip.
pub fn load_module(root: &Path, location: &Path) -> Result<ModuleFile, CoreError> {
    let path = root.join(location).join(MODULE_FILE);
    if !path.is_file() {
        return Err(CoreError::ModuleNotFound { path });
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    let mut module: ModuleFile =
        serde_yaml::from_str(&contents).map_err(|e| CoreError::Parse { path, source: e })?;
    module.location = location.to_path_buf();
    Ok(module)
}

/// Create a skeleton `module.yml` at `<root>/<location>`.
///
/// Idempotent: if a descriptor already exists there, loads and returns it
/// unchanged. Commands start empty (skip everything) for module owners to
/// fill in.
pub fn create_module(root: &Path, location: &Path, name: &str) -> Result<ModuleFile, CoreError> {
    let dir = root.join(location);
    let path = dir.join(MODULE_FILE);
    if path.is_file() {
        return load_module(root, location);
    }

    std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
    let module = ModuleFile {
        name: name.to_string(),
        location: location.to_path_buf(),
        commands: CommandSet::default(),
        exclude: Vec::new(),
    };
    let yaml = serde_yaml::to_string(&module)?;
    write_atomic(&path, &yaml)?;
    Ok(module)
}

// ---------------------------------------------------------------------------
// Atomic write
// ---------------------------------------------------------------------------

/// Write `contents` to `path` via a `.tmp` sibling then rename.
///
/// The sibling lives in the target's directory so the rename never crosses a
/// filesystem boundary. Shared with the lock ledger.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), CoreError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!("{file_name}.tmp"));

    std::fs::write(&tmp, contents).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
