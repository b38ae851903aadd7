//! `relay diff` — read-only report of pending modules per action kind.

use anyhow::{Context, Result};
use colored::Colorize;

use relay_core::ChangeKind;
use relay_engine::diff;

use super::project_root;

pub fn run() -> Result<()> {
    let root = project_root()?;
    let report = diff(&root).context("diff failed")?;

    for kind in ChangeKind::ALL {
        let pending = report.pending(kind);
        println!("{} module(s) pending {}", pending.len(), kind);
        for module in pending {
            println!("  {} ({})", module.name, module.location.display());
        }
    }

    if report.is_empty() {
        println!("{} Everything is up to date.", "✓".green());
    }
    Ok(())
}
