use super::{require, DockerCli, RemoveStatus};
use crate::DockhandError;

use std::ffi::OsString;
use std::path::PathBuf;
use tracing::{event, Level};

/// Describes an image build.
///
/// The build is rooted in a context directory, with the Dockerfile path
/// given relative to it. The Dockerfile is required but only verified
/// when the build is submitted, so an incomplete `ImageBuild` can be
/// constructed and passed around freely.
///
/// # Examples
/// ```rust
/// # use dockhand::ImageBuild;
/// let build = ImageBuild::with_context("services/db")
///     .dockerfile("Dockerfile.ci")
///     .tag("db:test")
///     .build_arg("PROFILE", "release");
/// ```
#[derive(Clone, Debug)]
pub struct ImageBuild {
    /// Build context directory, also used as the working directory of
    /// the invocation.
    context: PathBuf,
    /// Dockerfile path relative to the context.
    dockerfile: Option<PathBuf>,
    /// Tag applied to the built image.
    tag: Option<String>,
    /// Build arguments passed as `--build-arg=KEY=VALUE`.
    build_args: Vec<(String, String)>,
}

impl ImageBuild {
    /// Create a build rooted at the provided context directory.
    pub fn with_context<P: Into<PathBuf>>(context: P) -> ImageBuild {
        ImageBuild {
            context: context.into(),
            dockerfile: None,
            tag: None,
            build_args: Vec::new(),
        }
    }

    /// Set the Dockerfile to build, relative to the context directory.
    pub fn dockerfile<P: Into<PathBuf>>(mut self, dockerfile: P) -> ImageBuild {
        self.dockerfile = Some(dockerfile.into());
        self
    }

    /// Set the tag applied to the built image.
    pub fn tag<T: Into<String>>(mut self, tag: T) -> ImageBuild {
        self.tag = Some(tag.into());
        self
    }

    /// Append a build argument.
    pub fn build_arg<K, V>(mut self, key: K, value: V) -> ImageBuild
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.build_args.push((key.into(), value.into()));
        self
    }

    /// Assemble the invocation, rejecting a missing Dockerfile before
    /// anything is spawned.
    pub(crate) fn into_args(self) -> Result<(Vec<OsString>, PathBuf), DockhandError> {
        let ImageBuild {
            context,
            dockerfile,
            tag,
            build_args,
        } = self;

        let dockerfile = dockerfile.ok_or(DockhandError::MissingArgument("dockerfile"))?;

        let mut args = vec![
            OsString::from("build"),
            OsString::from("-f"),
            dockerfile.into_os_string(),
        ];
        if let Some(tag) = tag {
            args.push(OsString::from("-t"));
            args.push(OsString::from(tag));
        }
        for (key, value) in build_args {
            args.push(OsString::from(format!("--build-arg={}={}", key, value)));
        }
        args.push(OsString::from("."));

        Ok((args, context))
    }
}

impl DockerCli {
    /// Build an image as described by `build`.
    ///
    /// Fails with [DockhandError::MissingArgument] without invoking
    /// anything when no Dockerfile was provided.
    ///
    /// [DockhandError::MissingArgument]: crate::DockhandError::MissingArgument
    pub async fn build_image(&self, build: ImageBuild) -> Result<(), DockhandError> {
        let (args, context) = build.into_args()?;
        self.run(args, Some(context.as_path())).await?.success()?;
        event!(Level::DEBUG, "successfully built image");
        Ok(())
    }

    /// Remove an image by reference (`repository[:tag]` or id).
    ///
    /// Removing an image that does not exist is a successful no-op,
    /// reported as [RemoveStatus::AlreadyAbsent].
    pub async fn remove_image(&self, reference: &str) -> Result<RemoveStatus, DockhandError> {
        require("image", reference)?;
        self.run(["rmi", reference], None).await?.removed_or_absent()
    }

    /// Check whether an image reference is present locally.
    ///
    /// Implemented by listing local images and substring-testing the
    /// captured output against `reference`. A reference that is a
    /// prefix of another present reference (`app:1` vs `app:10`) can
    /// therefore report a false positive.
    pub async fn image_exists(&self, reference: &str) -> Result<bool, DockhandError> {
        require("image", reference)?;
        let output = self
            .run(["images", "--format", "{{.Repository}}:{{.Tag}}"], None)
            .await?
            .success()?;

        let exists = output.stdout.contains(reference);
        event!(Level::TRACE, "image {} present: {}", reference, exists);
        Ok(exists)
    }
}
