//! # relay-engine
//!
//! Change detection and orchestration for relay.
//!
//! Call [`execute`] to run one action kind across every changed module and
//! commit new digests to the lock ledger, or [`diff`] for a side-effect-free
//! report of what is pending.

pub mod detect;
pub mod diff;
pub mod error;
pub mod exec;
pub mod hasher;
pub mod orchestrate;

pub use detect::changed_modules;
pub use diff::{diff, DiffReport};
pub use error::EngineError;
pub use exec::run_command;
pub use hasher::hash_tree;
pub use orchestrate::{execute, RunReport};
