//! Relay core library — domain types, descriptor persistence, lock ledger.
//!
//! Public API surface:
//! - [`types`] — domain structs and the [`ChangeKind`] enum
//! - [`error`] — [`CoreError`]
//! - [`descriptor`] — project / module descriptor load, create, root lookup
//! - [`lockfile`] — lock ledger load / save

pub mod descriptor;
pub mod error;
pub mod lockfile;
pub mod types;

pub use error::CoreError;
pub use types::{ChangeKind, CommandSet, LockEntry, LockFile, ModuleFile, ProjectFile};
