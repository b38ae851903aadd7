//! Domain types for relay.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! All persisted types are serializable/deserializable via serde + serde_yaml.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ChangeKind
// ---------------------------------------------------------------------------

/// The action kind an invocation targets. Selects which command a module runs
/// and which hash field of its lock entry is read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Build,
    Test,
    Lint,
}

impl ChangeKind {
    /// All kinds, in the order the diff reporter presents them.
    pub const ALL: [ChangeKind; 3] = [ChangeKind::Build, ChangeKind::Test, ChangeKind::Lint];

    /// The configured command for this kind, if the module declares one.
    pub fn command_of<'a>(&self, module: &'a ModuleFile) -> Option<&'a str> {
        let cmd = match self {
            ChangeKind::Build => &module.commands.build,
            ChangeKind::Test => &module.commands.test,
            ChangeKind::Lint => &module.commands.lint,
        };
        cmd.as_deref()
    }

    /// The stored digest for this kind. Empty string means "never run".
    pub fn hash_of<'a>(&self, entry: &'a LockEntry) -> &'a str {
        match self {
            ChangeKind::Build => &entry.build_hash,
            ChangeKind::Test => &entry.test_hash,
            ChangeKind::Lint => &entry.lint_hash,
        }
    }

    /// Write a new digest into this kind's field, leaving the other two untouched.
    pub fn set_hash(&self, entry: &mut LockEntry, digest: String) {
        match self {
            ChangeKind::Build => entry.build_hash = digest,
            ChangeKind::Test => entry.test_hash = digest,
            ChangeKind::Lint => entry.lint_hash = digest,
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Build => write!(f, "build"),
            ChangeKind::Test => write!(f, "test"),
            ChangeKind::Lint => write!(f, "lint"),
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// Root project descriptor (`relay.yml`). Marks the repository root.
///
/// Created once by `relay init`; the engine never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The three optional per-module action commands.
///
/// An absent command means "skip, always succeeds" for that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint: Option<String>,
}

/// Per-module descriptor (`module.yml` in the module directory).
///
/// `location` is not part of the file; the loader fills it in with the
/// module's path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFile {
    pub name: String,
    #[serde(skip)]
    pub location: PathBuf,
    #[serde(default)]
    pub commands: CommandSet,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl ModuleFile {
    /// Identity key matching [`LockEntry::key`].
    pub fn key(&self) -> String {
        entry_key(&self.name, &self.location)
    }
}

// ---------------------------------------------------------------------------
// Lock ledger
// ---------------------------------------------------------------------------

/// One ledger record per known module: the content digest as of the last
/// successful run of each action kind. Empty string = never run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEntry {
    pub name: String,
    pub location: PathBuf,
    #[serde(default)]
    pub build_hash: String,
    #[serde(default)]
    pub test_hash: String,
    #[serde(default)]
    pub lint_hash: String,
}

impl LockEntry {
    /// A fresh entry with no recorded runs.
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            build_hash: String::new(),
            test_hash: String::new(),
            lint_hash: String::new(),
        }
    }

    /// Identity key: (name, location) pairs are unique within a ledger.
    pub fn key(&self) -> String {
        entry_key(&self.name, &self.location)
    }
}

/// The persisted lock ledger (`relay.lock`). Order of entries is the
/// iteration order for detection and execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockFile {
    #[serde(default)]
    pub modules: Vec<LockEntry>,
}

impl LockFile {
    /// Whether an entry with this (name, location) identity already exists.
    pub fn contains(&self, name: &str, location: &Path) -> bool {
        self.modules
            .iter()
            .any(|e| e.name == name && e.location == location)
    }

    /// Append an entry with empty hashes unless one already exists.
    ///
    /// Returns `true` if the entry was added.
    pub fn add_module(&mut self, name: &str, location: &Path) -> bool {
        if self.contains(name, location) {
            return false;
        }
        self.modules.push(LockEntry::new(name, location));
        true
    }
}

fn entry_key(name: &str, location: &Path) -> String {
    format!("{}:{}", name, location.display())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
