//! Errors that can arise from dockhand.

use thiserror::Error;

/// Public library error conditions.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum DockhandError {
    /// A required argument was empty or absent. Reported before any
    /// process is spawned.
    #[error("missing required argument `{0}`")]
    MissingArgument(&'static str),
    /// The docker binary could not be invoked at all.
    #[error("failed to invoke docker binary: {0}")]
    Invocation(String),
    /// The invoked command exited with a non-zero code that was not
    /// downgraded.
    #[error("command `{command}` failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        /// The full command line that was invoked.
        command: String,
        /// Exit code reported by the process, `-1` if terminated by a signal.
        exit_code: i32,
        /// Captured standard error output.
        stderr: String,
    },
    /// The followed log stream terminated before any chunk matched.
    #[error("log stream closed without matching pattern, exit code {exit_code}")]
    LogStreamClosed {
        /// Exit code of the log follower, `-1` if terminated by a signal.
        exit_code: i32,
    },
}
