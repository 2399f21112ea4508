use crate::error::{FlagError, FlagErrorExt, settle};
use crate::outcome::{Outcome, Rejection};
use switcharoo_domain::{BindingId, EnvironmentId, FeatureId};
use switcharoo_store::{BindingRecord, FlagStore};
use tracing::{debug, info, instrument};

/// Links features to environments. A pair is bound at most once and starts disabled.
#[derive(Debug, Clone)]
pub struct BindingManager<S> {
    store: S,
}

impl<S: FlagStore> BindingManager<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Binds `feature` to `environment` with `enabled = false`.
    ///
    /// An environment of another owner is reported as [`Rejection::EnvironmentNotFound`],
    /// so a caller cannot probe environments it does not own.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub async fn bind_environment(
        &self,
        feature: FeatureId,
        environment: EnvironmentId,
    ) -> Result<Outcome<BindingId>, FlagError> {
        let Some(owner) =
            self.store.find_feature(feature).await.context("resolving feature")?.map(|f| f.owner)
        else {
            debug!(%feature, "Unknown feature");
            return Ok(Rejection::FeatureNotFound.into());
        };

        let target =
            self.store.find_environment(environment).await.context("resolving environment")?;
        if !target.is_some_and(|env| env.owner == owner) {
            debug!(%environment, %owner, "Environment unknown to the feature owner");
            return Ok(Rejection::EnvironmentNotFound.into());
        }

        if self.store.find_binding(feature, environment).await.context("checking binding")?.is_some()
        {
            debug!(%feature, %environment, "Pair already bound");
            return Ok(Rejection::DuplicateBinding.into());
        }

        let id = BindingId::new();
        let record = BindingRecord { id, feature, environment, enabled: false };
        let outcome = settle(self.store.insert_binding(record).await, "inserting binding")?;

        if outcome.is_done() {
            info!(%feature, %environment, %id, "Environment bound");
        }
        Ok(outcome.map(|()| id))
    }

    /// Removes the binding of `feature` to `environment`.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub async fn unbind_environment(
        &self,
        feature: FeatureId,
        environment: EnvironmentId,
    ) -> Result<Outcome<()>, FlagError> {
        if self.store.find_feature(feature).await.context("resolving feature")?.is_none() {
            debug!(%feature, "Unknown feature");
            return Ok(Rejection::FeatureNotFound.into());
        }
        if !self.store.delete_binding(feature, environment).await.context("deleting binding")? {
            debug!(%feature, %environment, "Pair not bound");
            return Ok(Rejection::BindingNotFound.into());
        }

        info!(%feature, %environment, "Environment unbound");
        Ok(Outcome::Done(()))
    }
}
