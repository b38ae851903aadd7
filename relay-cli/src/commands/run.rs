//! `relay build` / `relay test` / `relay lint`

use anyhow::{Context, Result};
use colored::Colorize;

use relay_core::ChangeKind;
use relay_engine::execute;

use super::project_root;

/// Execute one action kind across all changed modules.
pub fn run(kind: ChangeKind) -> Result<()> {
    let root = project_root()?;

    let report = execute(&root, kind).with_context(|| format!("{kind} failed"))?;
    if report.is_noop() {
        println!("Nothing to {kind} — all modules up to date.");
        return Ok(());
    }

    println!(
        "{} {} {} module(s):",
        "✓".green(),
        past_tense(kind),
        report.executed.len()
    );
    for module in &report.executed {
        println!("  {} ({})", module.name, module.location.display());
    }
    Ok(())
}

fn past_tense(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Build => "Built",
        ChangeKind::Test => "Tested",
        ChangeKind::Lint => "Linted",
    }
}
