use super::{require, DockerCli, RemoveStatus};
use crate::DockhandError;

use futures::future::join_all;
use tracing::{event, Level};

impl DockerCli {
    /// Remove a container by name or id.
    ///
    /// Running containers are force removed and their anonymous volumes
    /// deleted. Removing a container that does not exist is a
    /// successful no-op, reported as [RemoveStatus::AlreadyAbsent].
    pub async fn remove_container(&self, name: &str) -> Result<RemoveStatus, DockhandError> {
        require("container", name)?;

        event!(Level::TRACE, "removing container {}", name);
        self.run(["rm", "--force", "--volumes", name], None)
            .await?
            .removed_or_absent()
    }

    /// Remove several containers concurrently.
    ///
    /// Statuses are returned in input order. The first error
    /// encountered is reported, after all removals have completed.
    pub async fn remove_containers(
        &self,
        names: &[&str],
    ) -> Result<Vec<RemoveStatus>, DockhandError> {
        join_all(names.iter().map(|name| self.remove_container(name)))
            .await
            .into_iter()
            .collect()
    }
}
