use crate::error::{FlagError, FlagErrorExt, settle};
use crate::outcome::{Outcome, Rejection};
use switcharoo_domain::{Environment, EnvironmentId, OwnerId};
use switcharoo_store::{EnvironmentRecord, FlagStore};
use tracing::{debug, info, instrument};

/// Creates, lists and deletes the environments of an owner.
///
/// Environment names are unique per owner and compared case-sensitively.
#[derive(Debug, Clone)]
pub struct EnvironmentRegistry<S> {
    store: S,
}

impl<S: FlagStore> EnvironmentRegistry<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an environment named `name` for `owner`.
    ///
    /// Rejected with [`Rejection::OwnerNotFound`] or [`Rejection::DuplicateEnvironment`].
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub async fn add_environment(
        &self,
        owner: OwnerId,
        name: &str,
    ) -> Result<Outcome<EnvironmentId>, FlagError> {
        if !self.store.owner_exists(owner).await.context("resolving owner")? {
            debug!(%owner, "Unknown owner");
            return Ok(Rejection::OwnerNotFound.into());
        }
        if self
            .store
            .find_environment_by_name(owner, name)
            .await
            .context("checking environment name")?
            .is_some()
        {
            debug!(%owner, name, "Environment name taken");
            return Ok(Rejection::DuplicateEnvironment.into());
        }

        let id = EnvironmentId::new();
        let record = EnvironmentRecord { id, owner, name: name.to_owned() };
        let outcome = settle(self.store.insert_environment(record).await, "inserting environment")?;

        if outcome.is_done() {
            info!(%owner, %id, name, "Environment created");
        }
        Ok(outcome.map(|()| id))
    }

    /// The environments of `owner`, in creation order.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub async fn list_environments(
        &self,
        owner: OwnerId,
    ) -> Result<Outcome<Vec<Environment>>, FlagError> {
        if !self.store.owner_exists(owner).await.context("resolving owner")? {
            debug!(%owner, "Unknown owner");
            return Ok(Rejection::OwnerNotFound.into());
        }

        let records = self.store.environments_of(owner).await.context("listing environments")?;
        Ok(Outcome::Done(records.into_iter().map(Environment::from).collect()))
    }

    /// Deletes `environment` together with every binding that references it.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub async fn delete_environment(
        &self,
        environment: EnvironmentId,
    ) -> Result<Outcome<()>, FlagError> {
        if !self.store.delete_environment(environment).await.context("deleting environment")? {
            debug!(%environment, "Unknown environment");
            return Ok(Rejection::EnvironmentNotFound.into());
        }

        info!(%environment, "Environment deleted");
        Ok(Outcome::Done(()))
    }
}
