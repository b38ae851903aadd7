//! Change detection against the lock ledger.

use std::path::Path;

use log::debug;

use relay_core::{descriptor, lockfile, ChangeKind, ModuleFile};

use crate::error::EngineError;
use crate::hasher;

/// Return the modules whose current digest differs from the ledger's stored
/// digest for `kind`, in ledger iteration order.
///
/// An empty stored digest means the action never ran, so the module is always
/// selected. A ledger entry whose module descriptor can no longer be loaded
/// is a hard error — that drift must surface to the operator, not vanish.
pub fn changed_modules(root: &Path, kind: ChangeKind) -> Result<Vec<ModuleFile>, EngineError> {
    let lock = lockfile::load_lock(root)?;

    let mut changed = Vec::new();
    for entry in &lock.modules {
        let module = descriptor::load_module(root, &entry.location)?;
        let digest = hasher::hash_tree(&root.join(&entry.location), &module.exclude)?;

        if kind.hash_of(entry) != digest {
            debug!(
                "module '{}' changed for {kind} (stored {:?})",
                module.name,
                kind.hash_of(entry)
            );
            changed.push(module);
        }
    }

    Ok(changed)
}
