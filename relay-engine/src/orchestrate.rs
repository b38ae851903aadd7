//! The execute-and-commit cycle for one action kind.
//!
//! State machine per invocation:
//!
//! ```text
//! detect -> (run each changed module, ledger order) -> commit ledger -> done
//! ```
//!
//! The first failing module aborts the whole invocation: modules after it are
//! not attempted and no ledger update happens for *any* module. A partially
//! updated ledger could mask a module that still needs rebuilding, so the
//! batch commits all-or-nothing; a fixed re-run re-detects the same set.

use std::collections::HashMap;
use std::path::Path;

use log::info;

use relay_core::{lockfile, ChangeKind, ModuleFile};

use crate::detect;
use crate::error::EngineError;
use crate::exec;
use crate::hasher;

/// Summary of one successful [`execute`] invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub kind: ChangeKind,
    /// Modules that ran, in ledger order.
    pub executed: Vec<ModuleFile>,
}

impl RunReport {
    /// True when detection found nothing to do.
    pub fn is_noop(&self) -> bool {
        self.executed.is_empty()
    }
}

/// Run `kind`'s command for every changed module and commit new digests.
///
/// Digests are recomputed *after* each module's command completes — build and
/// lint commands may rewrite non-excluded files in the tree, and the recorded
/// digest must describe the tree the action actually left behind. Only the
/// hash field for `kind` is written; the other two are untouched. The ledger
/// is persisted once, and only when every changed module succeeded.
pub fn execute(root: &Path, kind: ChangeKind) -> Result<RunReport, EngineError> {
    let changed = detect::changed_modules(root, kind)?;
    if changed.is_empty() {
        info!("{kind}: all modules up to date");
        return Ok(RunReport {
            kind,
            executed: changed,
        });
    }

    let mut new_digests: HashMap<String, String> = HashMap::new();
    for module in &changed {
        let command = kind.command_of(module).unwrap_or("");
        let module_dir = root.join(&module.location);
        info!("{kind} '{}' ({})", module.name, module.location.display());

        exec::run_command(command, &module_dir)?;

        let digest = hasher::hash_tree(&module_dir, &module.exclude)?;
        new_digests.insert(module.key(), digest);
    }

    let mut lock = lockfile::load_lock(root)?;
    for entry in &mut lock.modules {
        if let Some(digest) = new_digests.get(&entry.key()) {
            kind.set_hash(entry, digest.clone());
        }
    }
    lockfile::save_lock(root, &lock)?;

    info!("{kind}: {} module(s) completed", changed.len());
    Ok(RunReport {
        kind,
        executed: changed,
    })
}
