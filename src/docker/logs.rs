use super::{require, DockerCli};
use crate::pattern::OutputPattern;
use crate::DockhandError;

use bytes::Bytes;
use std::process::Stdio;
use tokio::io::AsyncReadExt;
use tokio::process::Child;
use tracing::{event, Level};

/// The output channel a log chunk arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum LogSource {
    /// The container's standard output.
    Stdout,
    /// The container's standard error.
    Stderr,
}

/// A single raw chunk read from the followed stream.
struct LogChunk {
    message: Bytes,
    source: LogSource,
}

const CHUNK_CAPACITY: usize = 8 * 1024;

impl DockerCli {
    /// Follow the combined output of `container` and wait until a chunk
    /// matches `pattern`.
    ///
    /// Spawns a `docker logs --follow` process and inspects every chunk
    /// received on either output channel independently. On the first
    /// match the follower is interrupted and the call resolves. If the
    /// stream terminates before any match, the call fails with
    /// [DockhandError::LogStreamClosed] carrying the follower's exit
    /// code.
    ///
    /// Chunks are matched as they arrive from the pipe. A match split
    /// across two chunks is not detected.
    ///
    /// There is no timeout; the call blocks until a match or until the
    /// stream closes. Callers needing a bounded wait should wrap the
    /// call, e.g. in [tokio::time::timeout].
    ///
    /// A container name unknown to the daemon is not treated specially,
    /// it simply produces a stream that closes without a match.
    ///
    /// [DockhandError::LogStreamClosed]: crate::DockhandError::LogStreamClosed
    pub async fn wait_for_output<P>(
        &self,
        container: &str,
        pattern: &P,
    ) -> Result<(), DockhandError>
    where
        P: OutputPattern + ?Sized,
    {
        require("container", container)?;

        let mut command = self.command();
        command
            .args(["logs", "--follow", container])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        event!(Level::TRACE, "following log stream of {}", container);
        let mut child = command.spawn().map_err(|e| {
            DockhandError::Invocation(format!("`docker logs --follow {}`: {}", container, e))
        })?;

        let mut stdout = child.stdout.take().ok_or_else(|| {
            DockhandError::Invocation("log follower stdout was not captured".to_string())
        })?;
        let mut stderr = child.stderr.take().ok_or_else(|| {
            DockhandError::Invocation("log follower stderr was not captured".to_string())
        })?;

        let mut stdout_open = true;
        let mut stderr_open = true;
        let mut stdout_buf = vec![0u8; CHUNK_CAPACITY];
        let mut stderr_buf = vec![0u8; CHUNK_CAPACITY];

        while stdout_open || stderr_open {
            let chunk = tokio::select! {
                read = stdout.read(&mut stdout_buf), if stdout_open => match read {
                    Ok(0) => {
                        stdout_open = false;
                        None
                    }
                    Ok(n) => Some(LogChunk {
                        message: Bytes::copy_from_slice(&stdout_buf[..n]),
                        source: LogSource::Stdout,
                    }),
                    Err(e) => {
                        return Err(DockhandError::Invocation(format!(
                            "reading log stream: {}",
                            e
                        )))
                    }
                },
                read = stderr.read(&mut stderr_buf), if stderr_open => match read {
                    Ok(0) => {
                        stderr_open = false;
                        None
                    }
                    Ok(n) => Some(LogChunk {
                        message: Bytes::copy_from_slice(&stderr_buf[..n]),
                        source: LogSource::Stderr,
                    }),
                    Err(e) => {
                        return Err(DockhandError::Invocation(format!(
                            "reading log stream: {}",
                            e
                        )))
                    }
                },
            };

            if let Some(chunk) = chunk {
                event!(
                    Level::TRACE,
                    "{} byte chunk on {} of {}",
                    chunk.message.len(),
                    chunk.source,
                    container
                );
                if pattern.is_match(&String::from_utf8_lossy(&chunk.message)) {
                    event!(
                        Level::DEBUG,
                        "pattern matched on {} of {}",
                        chunk.source,
                        container
                    );
                    interrupt(&mut child);
                    return Ok(());
                }
            }
        }

        // Both channels reached end of stream without a match.
        let status = child
            .wait()
            .await
            .map_err(|e| DockhandError::Invocation(format!("awaiting log follower: {}", e)))?;
        let exit_code = status.code().unwrap_or(-1);
        event!(
            Level::DEBUG,
            "log stream of {} closed without match, exit code {}",
            container,
            exit_code
        );
        Err(DockhandError::LogStreamClosed { exit_code })
    }
}

/// Deliver an interrupt to the follower.
///
/// The child is spawned with `kill_on_drop`, so a follower that ignores
/// the interrupt does not outlive the call.
#[cfg(unix)]
fn interrupt(child: &mut Child) {
    if let Some(pid) = child.id() {
        // SAFETY: kill() with a known-live pid only delivers the signal.
        unsafe {
            libc::kill(pid as libc::pid_t, libc::SIGINT);
        }
    }
}

#[cfg(not(unix))]
fn interrupt(child: &mut Child) {
    let _ = child.start_kill();
}
