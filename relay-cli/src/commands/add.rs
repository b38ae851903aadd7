//! `relay add <path> [--name NAME]`

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;

use relay_core::{descriptor, lockfile};

use super::project_root;

/// Register a module: create a skeleton `module.yml` (if absent) and add a
/// ledger entry with empty hashes, so every action sees it as never run.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Path to the module directory, inside the project.
    pub path: PathBuf,

    /// Module name. Defaults to the directory name.
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

impl AddArgs {
    pub fn run(self) -> Result<()> {
        let root = project_root()?;

        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("cannot create module directory '{}'", self.path.display()))?;
        let module_dir = self
            .path
            .canonicalize()
            .with_context(|| format!("cannot resolve path '{}'", self.path.display()))?;
        let location = module_dir
            .strip_prefix(&root)
            .map_err(|_| {
                anyhow!(
                    "'{}' is outside the project root {}",
                    module_dir.display(),
                    root.display()
                )
            })?
            .to_path_buf();

        let name = match self.name {
            Some(name) => name,
            None => module_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| location.display().to_string()),
        };

        let module = descriptor::create_module(&root, &location, &name)
            .with_context(|| format!("failed to create module at '{}'", location.display()))?;

        let mut lock = lockfile::load_lock(&root)?;
        if lock.add_module(&module.name, &location) {
            lockfile::save_lock(&root, &lock)?;
            println!(
                "{} Registered module '{}' at {}",
                "✓".green(),
                module.name,
                location.display()
            );
        } else {
            println!(
                "Module '{}' at {} is already registered.",
                module.name,
                location.display()
            );
        }

        println!("  Edit {}/module.yml to set its commands.", location.display());
        Ok(())
    }
}
