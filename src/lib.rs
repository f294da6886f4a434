#![deny(missing_docs)]
#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(rustdoc::broken_intra_doc_links)]

//! _dockhand_ is a convenience layer over the `docker` command-line tool.
//!
//! Every operation is a templated invocation of the docker binary with
//! its output captured: build and remove images, check image existence,
//! create and remove networks, remove containers, and follow a
//! container's log stream until a pattern matches. All durable state
//! lives in the container engine; this library holds none of its own.
//!
//! The entry point is [DockerCli]. Each call spawns exactly one external
//! process and owns it for the lifetime of the call, so a handle can be
//! cloned and used concurrently without coordination.
//!
//! The binary to invoke is `docker` from `PATH` by default, overridable
//! with the `DOCKHAND_BINARY` environment variable or
//! [DockerCli::with_binary] (e.g. for podman).
//!
//! # Waiting on log output
//!
//! The one operation with asynchronous behavior is
//! [DockerCli::wait_for_output]: it follows the container's combined
//! stdout/stderr stream and resolves when a chunk matches the supplied
//! [OutputPattern] — a compiled [regex::Regex], or a plain string
//! matched by substring. If the stream closes first, the call fails
//! with the follower's exit code. There is no built-in timeout.
//!
//! # Remove semantics
//!
//! Remove-style operations treat exit code 1 from the CLI as "target
//! already absent" and report [RemoveStatus::AlreadyAbsent] instead of
//! an error. Any other non-zero exit code is a hard failure.
//!
//! # Example
//!
//! ```rust,no_run
//! use dockhand::{DockerCli, ImageBuild};
//! use regex::Regex;
//!
//! # async fn run() -> Result<(), dockhand::DockhandError> {
//! let docker = DockerCli::new();
//!
//! docker
//!     .build_image(
//!         ImageBuild::with_context("./server")
//!             .dockerfile("Dockerfile")
//!             .tag("server:test"),
//!     )
//!     .await?;
//!
//! let ready = Regex::new("Server started").unwrap();
//! docker.wait_for_output("server-under-test", &ready).await?;
//!
//! docker.remove_container("server-under-test").await?;
//! docker.remove_image("server:test").await?;
//! # Ok(())
//! # }
//! ```

mod docker;
mod error;
mod pattern;

pub use crate::docker::{DockerCli, ImageBuild, LogSource, RemoveStatus, BINARY_ENV};
pub use crate::error::DockhandError;
pub use crate::pattern::OutputPattern;
