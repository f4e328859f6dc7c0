//! Binary execution.
//!
//! Runs a compiled solution once: optional memory-checker wrapping, optional
//! sanitizer environment overlay, stdin wired from one of three sources, and
//! output either captured or streamed through. The target's exit code is part
//! of the result, never an error.

use crate::config::presets::{MEMCHECK_ARGS, SANITIZER_ENV};
use crate::config::types::{ProcessResult, Result, RunOptions, SolveboxError, TestInput};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

/// Run `binary` with `args` once and return its result.
///
/// With `capture_output` the child's stdout/stderr come back as byte buffers;
/// otherwise they pass through to the invoking process's streams and the
/// result carries no output. Launch failures (missing binary, permissions)
/// propagate as errors; everything the child does after launching is an
/// ordinary [`ProcessResult`].
pub fn run(
    binary: &Path,
    args: &[String],
    options: &RunOptions,
    input: &TestInput,
    capture_output: bool,
) -> Result<ProcessResult> {
    let command = assemble_run_command(binary, args, options)?;
    // Nonempty by construction: the binary path is always pushed.
    let (program, argv) = command
        .split_first()
        .ok_or_else(|| SolveboxError::Process("empty run command".to_string()))?;

    let mut cmd = Command::new(program);
    cmd.args(argv);

    if options.sanitizer {
        // Overlay on the inherited environment; collisions favor the overlay.
        for (key, value) in SANITIZER_ENV {
            cmd.env(key, value);
        }
    }

    if capture_output {
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
    }

    match input {
        TestInput::File(path) => {
            let file = File::open(path)?;
            cmd.stdin(Stdio::from(file));
            wait_for_child(cmd, capture_output, None)
        }
        TestInput::Bytes(data) => {
            cmd.stdin(Stdio::piped());
            wait_for_child(cmd, capture_output, Some(data))
        }
        TestInput::Stdin => {
            cmd.stdin(Stdio::inherit());
            wait_for_child(cmd, capture_output, None)
        }
    }
}

/// Assemble the run command: memory-checker prefix (if any), absolute binary
/// path, then the caller's arguments, in that order.
fn assemble_run_command(binary: &Path, args: &[String], options: &RunOptions) -> Result<Vec<OsString>> {
    let mut command: Vec<OsString> = Vec::with_capacity(MEMCHECK_ARGS.len() + 1 + args.len());

    if options.memcheck {
        command.extend(MEMCHECK_ARGS.iter().map(OsString::from));
    }

    command.push(std::path::absolute(binary)?.into_os_string());
    command.extend(args.iter().map(OsString::from));

    Ok(command)
}

fn wait_for_child(mut cmd: Command, capture_output: bool, payload: Option<&[u8]>) -> Result<ProcessResult> {
    let mut child = cmd.spawn()?;

    // Feed stdin from a separate thread: once the payload and the child's
    // output both exceed the pipe buffer, writer and reader must run
    // concurrently or both sides block on full pipes.
    let writer = match payload {
        Some(data) => {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| SolveboxError::Process("child stdin was not piped".to_string()))?;
            let data = data.to_vec();
            Some(std::thread::spawn(move || {
                // A child that exits without draining stdin closes the pipe
                // early; that is its business, not a run failure.
                match stdin.write_all(&data) {
                    Err(err) if err.kind() != io::ErrorKind::BrokenPipe => Err(err),
                    _ => Ok(()),
                }
            }))
        }
        None => None,
    };

    let result = if capture_output {
        ProcessResult::from(child.wait_with_output()?)
    } else {
        ProcessResult::from_status(child.wait()?)
    };

    if let Some(handle) = writer {
        handle
            .join()
            .map_err(|_| SolveboxError::Process("stdin writer thread panicked".to_string()))??;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tokens(command: &[OsString]) -> Vec<String> {
        command
            .iter()
            .map(|t| t.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_memcheck_prefix_wraps_whole_command() {
        let options = RunOptions {
            sanitizer: false,
            memcheck: true,
        };
        let args = vec!["--flag".to_string(), "value".to_string()];

        let command = assemble_run_command(&PathBuf::from("solution"), &args, &options).unwrap();
        let tokens = tokens(&command);

        assert_eq!(&tokens[..2], MEMCHECK_ARGS);
        assert!(tokens[2].ends_with("solution"));
        assert!(Path::new(&tokens[2]).is_absolute());
        assert_eq!(&tokens[3..], ["--flag", "value"]);
    }

    #[test]
    fn test_plain_command_starts_with_absolute_binary() {
        let options = RunOptions::default();

        let command = assemble_run_command(&PathBuf::from("solution"), &[], &options).unwrap();
        let tokens = tokens(&command);

        assert_eq!(tokens.len(), 1);
        assert!(Path::new(&tokens[0]).is_absolute());
    }

    #[test]
    fn test_nonzero_exit_is_an_ordinary_result() {
        let result = run(
            &PathBuf::from("/bin/sh"),
            &["-c".to_string(), "exit 3".to_string()],
            &RunOptions::default(),
            &TestInput::Bytes(Vec::new()),
            true,
        )
        .unwrap();

        assert_eq!(result.exit_code, Some(3));
        assert!(!result.success());
    }

    #[test]
    fn test_missing_binary_propagates_launch_failure() {
        let result = run(
            &PathBuf::from("/nonexistent/solvebox-no-such-binary"),
            &[],
            &RunOptions::default(),
            &TestInput::Bytes(Vec::new()),
            true,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_passthrough_mode_captures_nothing() {
        let result = run(
            &PathBuf::from("/bin/sh"),
            &["-c".to_string(), "true".to_string()],
            &RunOptions::default(),
            &TestInput::Bytes(Vec::new()),
            false,
        )
        .unwrap();

        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.is_none());
        assert!(result.stderr.is_none());
    }
}
