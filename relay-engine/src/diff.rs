//! Read-only pending-change report.

use std::path::Path;

use relay_core::{ChangeKind, ModuleFile};

use crate::detect;
use crate::error::EngineError;

/// Modules pending each action kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    pub build: Vec<ModuleFile>,
    pub test: Vec<ModuleFile>,
    pub lint: Vec<ModuleFile>,
}

impl DiffReport {
    /// True when nothing is pending for any kind.
    pub fn is_empty(&self) -> bool {
        self.build.is_empty() && self.test.is_empty() && self.lint.is_empty()
    }

    /// The pending set for one kind.
    pub fn pending(&self, kind: ChangeKind) -> &[ModuleFile] {
        match kind {
            ChangeKind::Build => &self.build,
            ChangeKind::Test => &self.test,
            ChangeKind::Lint => &self.lint,
        }
    }
}

/// Detect pending modules for all three kinds without executing anything or
/// touching the ledger. Safe to call repeatedly.
pub fn diff(root: &Path) -> Result<DiffReport, EngineError> {
    Ok(DiffReport {
        build: detect::changed_modules(root, ChangeKind::Build)?,
        test: detect::changed_modules(root, ChangeKind::Test)?,
        lint: detect::changed_modules(root, ChangeKind::Lint)?,
    })
}
