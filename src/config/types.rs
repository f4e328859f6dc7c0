/// Core types and structures for the solvebox system
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Options for a single compile invocation.
///
/// Constructed once per call; never mutated afterwards.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Compile with address/UB sanitizers
    pub sanitizer: bool,
    /// Show the assembled compiler command line
    pub verbose: bool,
}

/// Options for a single run invocation.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct RunOptions {
    /// Enable colored sanitizer diagnostics in the child environment
    pub sanitizer: bool,
    /// Wrap the binary in the external memory checker
    pub memcheck: bool,
}

/// Run options for a test-runner driving many runs.
///
/// The runner itself only reads the embedded [`RunOptions`]; the extra fields
/// belong to the test-runner collaborator deciding pass/fail policy.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct TestRunOptions {
    pub run: RunOptions,
    /// Keep going after a failed test
    pub continue_on_error: bool,
    /// Treat a nonzero exit code as an ordinary outcome
    pub ignore_exit_code: bool,
    /// The test comes from the problem statement samples
    pub is_sample: bool,
}

impl AsRef<RunOptions> for TestRunOptions {
    fn as_ref(&self) -> &RunOptions {
        &self.run
    }
}

/// Build target: what to compile and how.
///
/// Loading and validating targets is the caller's concern; this layer only
/// reads the fields below.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Target {
    /// Target name, for progress output only
    pub name: String,
    /// Compiler executable (path, or name resolved via PATH)
    pub compiler: String,
    /// Base compiler flags, in order
    pub flags: Vec<String>,
    /// Library names linked as `-l<name>`, in order
    pub libs: Vec<String>,
    /// Output file name within the working directory; compiler default if absent
    pub out: Option<String>,
    /// Glob patterns selecting source files, expanded in order
    pub files: Vec<String>,
    /// Assembly sources are 64-bit (no `-m32` compat flag)
    pub asm64bit: bool,
    /// Build with sanitizers unless the caller says otherwise
    pub default_sanitizer: bool,
}

/// Where a running binary's standard input comes from.
///
/// Closed set: exactly one source per run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TestInput {
    /// Read from a file on disk
    File(PathBuf),
    /// Feed an in-memory payload, no intermediate file
    Bytes(Vec<u8>),
    /// Inherit the invoking process's own stdin
    Stdin,
}

/// Result of one run of a target binary.
///
/// Produced fresh per invocation and owned by the caller. A nonzero exit code
/// is an ordinary result here, never an error.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Exit code, absent when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// Terminating signal, if any
    pub signal: Option<i32>,
    /// Captured standard output; absent in passthrough mode
    pub stdout: Option<Vec<u8>>,
    /// Captured standard error; absent in passthrough mode
    pub stderr: Option<Vec<u8>>,
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub(crate) fn from_status(status: std::process::ExitStatus) -> Self {
        use std::os::unix::process::ExitStatusExt;
        Self {
            exit_code: status.code(),
            signal: status.signal(),
            stdout: None,
            stderr: None,
        }
    }
}

impl From<std::process::Output> for ProcessResult {
    fn from(output: std::process::Output) -> Self {
        use std::os::unix::process::ExitStatusExt;
        Self {
            exit_code: output.status.code(),
            signal: output.status.signal(),
            stdout: Some(output.stdout),
            stderr: Some(output.stderr),
        }
    }
}

/// Custom error types for solvebox
#[derive(Error, Debug)]
pub enum SolveboxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Process error: {0}")]
    Process(String),
}

impl From<glob::PatternError> for SolveboxError {
    fn from(err: glob::PatternError) -> Self {
        SolveboxError::Config(format!("bad source pattern: {}", err))
    }
}

impl From<glob::GlobError> for SolveboxError {
    fn from(err: glob::GlobError) -> Self {
        SolveboxError::Io(err.into())
    }
}

/// Result type alias for solvebox operations
pub type Result<T> = std::result::Result<T, SolveboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_options_shared_through_test_variant() {
        let options = TestRunOptions {
            run: RunOptions {
                sanitizer: true,
                memcheck: true,
            },
            continue_on_error: true,
            ignore_exit_code: false,
            is_sample: true,
        };

        let shared: &RunOptions = options.as_ref();
        assert!(shared.sanitizer);
        assert!(shared.memcheck);
    }

    #[test]
    fn test_process_result_success_requires_exit_zero() {
        let ok = ProcessResult {
            exit_code: Some(0),
            ..Default::default()
        };
        let failed = ProcessResult {
            exit_code: Some(1),
            ..Default::default()
        };
        let signaled = ProcessResult {
            exit_code: None,
            signal: Some(9),
            ..Default::default()
        };

        assert!(ok.success());
        assert!(!failed.success());
        assert!(!signaled.success());
    }
}
