//! CLI subcommand implementations.

pub mod add;
pub mod diff;
pub mod init;
pub mod run;

use std::path::PathBuf;

use anyhow::{Context, Result};

use relay_core::descriptor;

/// Resolve the project root from the current working directory and verify
/// its descriptor is readable.
pub(crate) fn project_root() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let root = descriptor::find_root(&cwd)?;
    descriptor::load_project(&root)?;
    Ok(root)
}
