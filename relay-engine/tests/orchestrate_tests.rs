//! End-to-end orchestration scenarios over a temp project.
//!
//! Each test builds an isolated repository root with `relay.yml`, a lock
//! ledger, and module directories, then drives `execute` / `diff` against it.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use relay_core::{descriptor, lockfile, ChangeKind, CommandSet, LockFile};
use relay_engine::{diff, execute, EngineError};

/// Create a project root with one module per (location, commands) pair.
/// Every module gets a `src.txt` seed file so its tree is non-empty.
fn setup_project(modules: &[(&str, CommandSet)]) -> TempDir {
    let root = TempDir::new().expect("tempdir");
    descriptor::init_project(root.path(), "demo").expect("init project");

    let mut lock = LockFile::default();
    for (location, commands) in modules {
        let location = Path::new(location);
        let name = location
            .file_name()
            .expect("location has a name")
            .to_string_lossy()
            .into_owned();

        let mut module = descriptor::create_module(root.path(), location, &name).expect("module");
        module.commands = commands.clone();
        let yaml = serde_yaml_string(&module);
        fs::write(root.path().join(location).join(descriptor::MODULE_FILE), yaml)
            .expect("write module.yml");

        fs::write(root.path().join(location).join("src.txt"), name.as_bytes())
            .expect("seed source");
        lock.add_module(&name, location);
    }
    lockfile::save_lock(root.path(), &lock).expect("save lock");
    root
}

fn serde_yaml_string(module: &relay_core::ModuleFile) -> String {
    serde_yaml::to_string(module).expect("serialize module")
}

fn commands(build: &str, test: &str, lint: &str) -> CommandSet {
    let opt = |s: &str| {
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    };
    CommandSet {
        build: opt(build),
        test: opt(test),
        lint: opt(lint),
    }
}

#[test]
fn first_build_runs_all_modules_and_writes_artifacts() {
    let root = setup_project(&[
        ("test/a", commands("touch a", "", "")),
        ("test/b", commands("touch b", "", "")),
    ]);

    let report = execute(root.path(), ChangeKind::Build).expect("build");
    assert_eq!(report.executed.len(), 2);
    assert!(root.path().join("test/a/a").exists());
    assert!(root.path().join("test/b/b").exists());

    let pending = diff(root.path()).expect("diff");
    assert!(pending.build.is_empty(), "build set should be empty after build");
}

#[test]
fn second_build_is_a_no_op() {
    let root = setup_project(&[("test/a", commands("touch a", "", ""))]);

    execute(root.path(), ChangeKind::Build).expect("first build");
    let lock_before = lockfile::load_lock(root.path()).expect("load");

    let report = execute(root.path(), ChangeKind::Build).expect("second build");
    assert!(report.is_noop());

    let lock_after = lockfile::load_lock(root.path()).expect("reload");
    assert_eq!(lock_after, lock_before, "no-op run must leave the ledger unchanged");
}

#[test]
fn editing_one_module_rebuilds_only_that_module() {
    let root = setup_project(&[
        ("test/a", commands("touch a", "", "")),
        ("test/b", commands("touch b", "", "")),
    ]);
    execute(root.path(), ChangeKind::Build).expect("first build");

    fs::write(root.path().join("test/a/src.txt"), "edited").expect("edit a");
    let b_hash_before = lockfile::load_lock(root.path()).expect("load").modules[1]
        .build_hash
        .clone();

    let report = execute(root.path(), ChangeKind::Build).expect("rebuild");
    let names: Vec<_> = report.executed.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["a"]);

    let lock = lockfile::load_lock(root.path()).expect("reload");
    assert_eq!(lock.modules[1].build_hash, b_hash_before, "b's hash must be untouched");
}

#[test]
fn failing_module_aborts_batch_and_commits_nothing() {
    // Ledger order: a succeeds, b fails, c must never run.
    let root = setup_project(&[
        ("test/a", commands("touch a", "", "")),
        ("test/b", commands("false", "", "")),
        ("test/c", commands("touch c", "", "")),
    ]);

    let err = execute(root.path(), ChangeKind::Build).unwrap_err();
    assert!(matches!(err, EngineError::CommandFailed { .. }));
    assert!(
        !root.path().join("test/c/c").exists(),
        "modules after the failure must not be attempted"
    );

    // The whole batch is discarded: even a's success is not committed.
    let lock = lockfile::load_lock(root.path()).expect("load");
    for entry in &lock.modules {
        assert_eq!(entry.build_hash, "", "no partial commit for '{}'", entry.name);
    }

    // A later diff still lists every module as pending a build.
    let pending = diff(root.path()).expect("diff");
    assert_eq!(pending.build.len(), 3);
}

#[test]
fn lint_updates_only_the_lint_hash() {
    let root = setup_project(&[("test/a", commands("touch a", "", "true"))]);
    execute(root.path(), ChangeKind::Build).expect("build");

    let before = lockfile::load_lock(root.path()).expect("load").modules[0].clone();
    execute(root.path(), ChangeKind::Lint).expect("lint");
    let after = lockfile::load_lock(root.path()).expect("reload").modules[0].clone();

    assert_ne!(after.lint_hash, "", "lint hash must be recorded");
    assert_eq!(after.build_hash, before.build_hash);
    assert_eq!(after.test_hash, before.test_hash);
}

#[test]
fn empty_command_always_succeeds_and_still_records_the_hash() {
    let root = setup_project(&[("test/a", commands("", "", ""))]);

    let report = execute(root.path(), ChangeKind::Lint).expect("lint with no command");
    assert_eq!(report.executed.len(), 1);

    let lock = lockfile::load_lock(root.path()).expect("load");
    assert_ne!(lock.modules[0].lint_hash, "");
    assert_eq!(lock.modules[0].build_hash, "");
}

#[test]
fn post_run_artifacts_are_hashed_unless_excluded() {
    // The build drops an artifact into the tree. With no exclusion, the
    // committed digest covers it, so the module settles after one build.
    let root = setup_project(&[("test/a", commands("touch built.out", "", ""))]);
    execute(root.path(), ChangeKind::Build).expect("build");

    let pending = diff(root.path()).expect("diff");
    assert!(pending.build.is_empty(), "post-run digest must cover the artifact");
}

#[test]
fn excluded_artifact_churn_does_not_retrigger() {
    let root = setup_project(&[("test/a", CommandSet::default())]);

    // Mark the module's output directory excluded.
    let location = Path::new("test/a");
    let mut module = descriptor::load_module(root.path(), location).expect("load module");
    module.exclude = vec!["out".to_string()];
    fs::write(
        root.path().join(location).join(descriptor::MODULE_FILE),
        serde_yaml_string(&module),
    )
    .expect("rewrite module.yml");

    execute(root.path(), ChangeKind::Build).expect("build");

    fs::create_dir_all(root.path().join("test/a/out")).expect("mkdir out");
    fs::write(root.path().join("test/a/out/app.bin"), "artifact").expect("write artifact");

    let pending = diff(root.path()).expect("diff");
    assert!(
        pending.build.is_empty(),
        "excluded artifact changes must not poison the change signal"
    );
}

#[test]
fn diff_reports_all_three_kinds_independently() {
    let root = setup_project(&[("test/a", commands("touch a", "true", "true"))]);

    execute(root.path(), ChangeKind::Test).expect("test");
    let pending = diff(root.path()).expect("diff");

    assert_eq!(pending.test.len(), 0);
    assert_eq!(pending.build.len(), 1);
    assert_eq!(pending.lint.len(), 1);
}

#[test]
fn diff_is_side_effect_free() {
    let root = setup_project(&[("test/a", commands("touch a", "", ""))]);
    let lock_before = lockfile::load_lock(root.path()).expect("load");

    let first = diff(root.path()).expect("diff");
    let second = diff(root.path()).expect("diff again");
    assert_eq!(first, second);

    let lock_after = lockfile::load_lock(root.path()).expect("reload");
    assert_eq!(lock_after, lock_before);
    assert!(
        !root.path().join("test/a/a").exists(),
        "diff must not execute module commands"
    );
}
