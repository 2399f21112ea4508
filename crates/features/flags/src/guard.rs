//! Ownership predicates gating mutations.
//!
//! The guard is opaque: an unknown owner, an unknown resource and a resource owned by
//! someone else all answer `false`. Only store failures surface as errors.

use crate::error::{FlagError, FlagErrorExt};
use switcharoo_domain::{EnvironmentId, FeatureId, OwnerId};
use switcharoo_store::FlagStore;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct Guard<S> {
    store: S,
}

impl<S: FlagStore> Guard<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether `owner` is a known identity.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(level = "debug", skip(self))]
    pub async fn is_admin(&self, owner: OwnerId) -> Result<bool, FlagError> {
        self.store.owner_exists(owner).await.context("resolving owner")
    }

    /// Whether `owner` created `feature`.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(level = "debug", skip(self))]
    pub async fn is_feature_admin(
        &self,
        feature: FeatureId,
        owner: OwnerId,
    ) -> Result<bool, FlagError> {
        let record = self.store.find_feature(feature).await.context("resolving feature")?;
        Ok(record.is_some_and(|record| record.owner == owner))
    }

    /// Whether `owner` created `environment`.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(level = "debug", skip(self))]
    pub async fn is_environment_admin(
        &self,
        environment: EnvironmentId,
        owner: OwnerId,
    ) -> Result<bool, FlagError> {
        let record =
            self.store.find_environment(environment).await.context("resolving environment")?;
        Ok(record.is_some_and(|record| record.owner == owner))
    }
}
