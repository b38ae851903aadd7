//! `relay init [path] [--name NAME]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use relay_core::{descriptor, lockfile, CoreError, LockFile};

/// Initialize a relay project: create `relay.yml` and an empty `relay.lock`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize. Defaults to the current directory.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Project name. Defaults to the directory name.
    #[arg(long, short = 'n')]
    pub name: Option<String>,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let root = self
            .path
            .canonicalize()
            .with_context(|| format!("cannot resolve path '{}'", self.path.display()))?;

        let name = match self.name {
            Some(name) => name,
            None => root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "relay-project".to_string()),
        };

        let project = descriptor::init_project(&root, &name)
            .with_context(|| format!("failed to init project at '{}'", root.display()))?;

        // A re-init must never wipe recorded hashes.
        match lockfile::load_lock(&root) {
            Ok(_) => {}
            Err(CoreError::LockNotFound { .. }) => {
                lockfile::save_lock(&root, &LockFile::default())
                    .context("failed to create lock file")?;
            }
            Err(err) => return Err(err.into()),
        }

        println!(
            "{} Initialized project '{}' at {}",
            "✓".green(),
            project.name,
            root.display()
        );
        Ok(())
    }
}
