//! Relay — incremental monorepo build/test/lint runner.
//!
//! # Usage
//!
//! ```text
//! relay init [path] [--name NAME]
//! relay add <path> [--name NAME]
//! relay build
//! relay test
//! relay lint
//! relay diff
//! ```
//!
//! `build`, `test`, and `lint` run the matching command of every module whose
//! content changed since that action last succeeded, and record new content
//! hashes on success. `diff` reports what would run, without running it.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{add::AddArgs, init::InitArgs};
use relay_core::ChangeKind;

#[derive(Parser, Debug)]
#[command(
    name = "relay",
    version,
    about = "Run build/test/lint only for monorepo modules that changed",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a relay project at a directory root.
    Init(InitArgs),

    /// Register a module directory with the project.
    Add(AddArgs),

    /// Build modules whose content changed since their last build.
    Build,

    /// Test modules whose content changed since their last test run.
    Test,

    /// Lint modules whose content changed since their last lint run.
    Lint,

    /// Show how many modules are pending each action, without running any.
    Diff,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Add(args) => args.run(),
        Commands::Build => commands::run::run(ChangeKind::Build),
        Commands::Test => commands::run::run(ChangeKind::Test),
        Commands::Lint => commands::run::run(ChangeKind::Lint),
        Commands::Diff => commands::diff::run(),
    }
}
