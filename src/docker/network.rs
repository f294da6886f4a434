use super::{require, DockerCli, RemoveStatus};
use crate::DockhandError;

use tracing::{event, Level};

impl DockerCli {
    /// Create a docker network with the given name and return its id.
    ///
    /// Creation of an already existing network is a hard failure, the
    /// absent-target downgrade applies to remove operations only.
    pub async fn create_network(&self, name: &str) -> Result<String, DockhandError> {
        require("network", name)?;

        event!(Level::TRACE, "creating network {}", name);
        let output = self
            .run(["network", "create", name], None)
            .await?
            .success()?;

        Ok(output.stdout.trim().to_string())
    }

    /// Remove a docker network by name or id.
    ///
    /// Removing a network that does not exist is a successful no-op,
    /// reported as [RemoveStatus::AlreadyAbsent].
    pub async fn remove_network(&self, name: &str) -> Result<RemoveStatus, DockhandError> {
        require("network", name)?;

        event!(Level::TRACE, "removing network {}", name);
        self.run(["network", "rm", name], None)
            .await?
            .removed_or_absent()
    }
}
