use crate::DockhandError;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{event, Level};

mod container;
mod image;
mod logs;
mod network;

pub use image::ImageBuild;
pub use logs::LogSource;

/// Environment variable overriding which binary is invoked for all
/// operations. Useful to point the library at e.g. `podman`.
pub const BINARY_ENV: &str = "DOCKHAND_BINARY";

/// Encapsulates all docker CLI operations.
///
/// Every operation is a templated invocation of the configured binary,
/// with captured output. The handle holds no other state and is cheap
/// to clone; concurrent calls each own their spawned process
/// exclusively.
#[derive(Clone, Debug)]
pub struct DockerCli {
    binary: PathBuf,
}

/// Outcome of a remove-style operation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, strum::Display)]
pub enum RemoveStatus {
    /// The target existed and was removed.
    Removed,
    /// The remove command exited with code 1, which is taken to mean
    /// the target was already gone. Every other cause of exit code 1
    /// is conflated into this variant as well.
    AlreadyAbsent,
}

/// Captured result of a single CLI invocation.
#[derive(Debug, Clone)]
pub(crate) struct CommandOutput {
    pub(crate) command: String,
    pub(crate) exit_code: i32,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        DockerCli::new()
    }
}

impl DockerCli {
    /// Construct a handle invoking the binary named by [BINARY_ENV],
    /// falling back to `docker` resolved through `PATH`.
    pub fn new() -> Self {
        let binary = std::env::var_os(BINARY_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("docker"));
        DockerCli { binary }
    }

    /// Construct a handle invoking the provided binary.
    pub fn with_binary<P: Into<PathBuf>>(binary: P) -> Self {
        DockerCli {
            binary: binary.into(),
        }
    }

    pub(crate) fn command(&self) -> Command {
        Command::new(&self.binary)
    }

    pub(crate) fn display_command(&self, args: &[OsString]) -> String {
        let mut display = self.binary.display().to_string();
        for arg in args {
            display.push(' ');
            display.push_str(&arg.to_string_lossy());
        }
        display
    }

    /// Invoke the binary with the given arguments and wait for it to
    /// exit, capturing both output channels.
    pub(crate) async fn run<I, S>(
        &self,
        args: I,
        working_dir: Option<&Path>,
    ) -> Result<CommandOutput, DockhandError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let command_line = self.display_command(&args);
        event!(Level::TRACE, "invoking `{}`", command_line);

        let mut command = self.command();
        command.args(&args);
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .await
            .map_err(|e| DockhandError::Invocation(format!("`{}`: {}", command_line, e)))?;

        let output = CommandOutput {
            command: command_line,
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        event!(
            Level::TRACE,
            "`{}` exited with code {}",
            output.command,
            output.exit_code
        );
        Ok(output)
    }
}

impl CommandOutput {
    fn failure(self) -> DockhandError {
        DockhandError::CommandFailed {
            command: self.command,
            exit_code: self.exit_code,
            stderr: self.stderr.trim().to_string(),
        }
    }

    /// Require a zero exit code.
    pub(crate) fn success(self) -> Result<CommandOutput, DockhandError> {
        if self.exit_code == 0 {
            Ok(self)
        } else {
            Err(self.failure())
        }
    }

    /// Exit code convention for remove-style commands: code 1 means the
    /// target was already absent and is downgraded to a successful
    /// no-op. All other non-zero codes are hard failures.
    pub(crate) fn removed_or_absent(self) -> Result<RemoveStatus, DockhandError> {
        match self.exit_code {
            0 => Ok(RemoveStatus::Removed),
            1 => {
                event!(
                    Level::DEBUG,
                    "`{}` reported absent target: {}",
                    self.command,
                    self.stderr.trim()
                );
                Ok(RemoveStatus::AlreadyAbsent)
            }
            _ => Err(self.failure()),
        }
    }
}

/// Reject empty required string arguments before any process is spawned.
pub(crate) fn require(name: &'static str, value: &str) -> Result<(), DockhandError> {
    if value.is_empty() {
        Err(DockhandError::MissingArgument(name))
    } else {
        Ok(())
    }
}
