//! Module command execution.
//!
//! Commands are argv vectors split on whitespace — there is no shell
//! interpretation (quoting, globbing, pipes), so arguments containing spaces
//! are unsupported by design. The child's stdout and stderr are drained by
//! one reader thread each, line-buffered, and forwarded to this process's
//! matching streams as they arrive. Ordering across the two channels is
//! unspecified; each channel preserves its own line order.
//!
//! There is no timeout or cancellation: a hung child hangs the invocation.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use log::debug;

use crate::error::{io_err, EngineError};

/// Run `command` with `dir` as its working directory, streaming output until
/// the process exits.
///
/// An empty (or all-whitespace) command is a no-op success — modules opt out
/// of an action kind by leaving its command unset. Both reader threads are
/// joined after the child exits, so every buffered line is flushed before
/// completion is reported. A launch failure or non-zero exit is an error;
/// commands are never retried.
pub fn run_command(command: &str, dir: &Path) -> Result<(), EngineError> {
    let command = command.trim();
    let mut parts = command.split_whitespace();
    let Some(program) = parts.next() else {
        debug!("no command configured for {dir:?}, skipping");
        return Ok(());
    };

    let mut child = Command::new(program)
        .args(parts)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| EngineError::Spawn {
            command: command.to_string(),
            dir: dir.to_path_buf(),
            source: e,
        })?;

    let stdout = child.stdout.take().map(|out| stream_lines(out, false));
    let stderr = child.stderr.take().map(|err| stream_lines(err, true));

    let status = child.wait().map_err(|e| io_err(dir, e))?;

    // Both channels close at process exit; join so no tail output is lost.
    if let Some(handle) = stdout {
        let _ = handle.join();
    }
    if let Some(handle) = stderr {
        let _ = handle.join();
    }

    if !status.success() {
        return Err(EngineError::CommandFailed {
            command: command.to_string(),
            dir: dir.to_path_buf(),
            status,
        });
    }
    Ok(())
}

/// Spawn a reader thread that forwards each line of `source` to this
/// process's stdout or stderr. The thread ends when the channel closes.
fn stream_lines<R>(source: R, to_stderr: bool) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let reader = BufReader::new(source);
        for line in reader.lines().map_while(Result::ok) {
            if to_stderr {
                eprintln!("{line}");
            } else {
                println!("{line}");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn empty_command_is_a_no_op_success() {
        let dir = TempDir::new().expect("tempdir");
        run_command("", dir.path()).expect("empty command");
        run_command("   ", dir.path()).expect("whitespace command");
    }

    #[test]
    fn command_runs_in_the_given_working_directory() {
        let dir = TempDir::new().expect("tempdir");
        run_command("touch artifact.out", dir.path()).expect("touch");
        assert!(dir.path().join("artifact.out").exists());
    }

    #[test]
    fn whitespace_split_passes_each_argument() {
        let dir = TempDir::new().expect("tempdir");
        run_command("touch one two three", dir.path()).expect("touch");
        for name in ["one", "two", "three"] {
            assert!(dir.path().join(name).exists(), "missing {name}");
        }
    }

    #[test]
    fn nonzero_exit_is_command_failed() {
        let dir = TempDir::new().expect("tempdir");
        let err = run_command("false", dir.path()).unwrap_err();
        match err {
            EngineError::CommandFailed { command, status, .. } => {
                assert_eq!(command, "false");
                assert!(!status.success());
            }
            other => panic!("expected command failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_executable_is_a_spawn_error() {
        let dir = TempDir::new().expect("tempdir");
        let err = run_command("definitely-not-a-real-binary --flag", dir.path()).unwrap_err();
        assert!(matches!(err, EngineError::Spawn { .. }));
    }

    #[test]
    fn high_volume_output_on_both_channels_does_not_deadlock() {
        let dir = TempDir::new().expect("tempdir");
        let script = dir.path().join("noisy.sh");
        fs::write(
            &script,
            "#!/bin/sh\ni=0\nwhile [ $i -lt 2000 ]; do\n  echo \"out $i\"\n  echo \"err $i\" >&2\n  i=$((i+1))\ndone\n",
        )
        .expect("write script");
        run_command("sh noisy.sh", dir.path()).expect("noisy command");
    }
}
