use crate::error::{FlagError, FlagErrorExt, settle};
use crate::outcome::{Outcome, Rejection};
use fxhash::FxHashMap;
use switcharoo_domain::{Binding, Feature, FeatureId, OwnerId};
use switcharoo_store::{FeatureRecord, FlagStore};
use tracing::{debug, info, instrument};

/// Creates, lists and deletes the features of an owner.
#[derive(Debug, Clone)]
pub struct FeatureRegistry<S> {
    store: S,
}

impl<S: FlagStore> FeatureRegistry<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a feature without bindings.
    ///
    /// Rejected with [`Rejection::OwnerNotFound`] or [`Rejection::DuplicateFeature`].
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(skip(self, description))]
    pub async fn add_feature(
        &self,
        owner: OwnerId,
        name: &str,
        description: &str,
    ) -> Result<Outcome<FeatureId>, FlagError> {
        if !self.store.owner_exists(owner).await.context("resolving owner")? {
            debug!(%owner, "Unknown owner");
            return Ok(Rejection::OwnerNotFound.into());
        }
        if self.store.find_feature_by_name(owner, name).await.context("checking feature name")?.is_some()
        {
            debug!(%owner, name, "Feature name taken");
            return Ok(Rejection::DuplicateFeature.into());
        }

        let id = FeatureId::new();
        let record = FeatureRecord {
            id,
            owner,
            name: name.to_owned(),
            description: description.to_owned(),
        };
        let outcome = settle(self.store.insert_feature(record).await, "inserting feature")?;

        if outcome.is_done() {
            info!(%owner, %id, name, "Feature created");
        }
        Ok(outcome.map(|()| id))
    }

    /// Deletes `feature` and all of its bindings.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub async fn delete_feature(&self, feature: FeatureId) -> Result<Outcome<()>, FlagError> {
        if !self.store.delete_feature(feature).await.context("deleting feature")? {
            debug!(%feature, "Unknown feature");
            return Ok(Rejection::FeatureNotFound.into());
        }

        info!(%feature, "Feature deleted");
        Ok(Outcome::Done(()))
    }

    /// The features of `owner` with their bindings and bound environments materialised.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub async fn list_features(&self, owner: OwnerId) -> Result<Outcome<Vec<Feature>>, FlagError> {
        if !self.store.owner_exists(owner).await.context("resolving owner")? {
            debug!(%owner, "Unknown owner");
            return Ok(Rejection::OwnerNotFound.into());
        }

        let records = self.store.features_of(owner).await.context("listing features")?;
        let ids: Vec<FeatureId> = records.iter().map(|record| record.id).collect();
        let rows = self.store.bindings_of(&ids).await.context("loading bindings")?;

        let mut bindings: FxHashMap<FeatureId, Vec<Binding>> = FxHashMap::default();
        for row in rows {
            bindings.entry(row.binding.feature).or_default().push(row.into());
        }

        let features = records
            .into_iter()
            .map(|record| Feature {
                bindings: bindings.remove(&record.id).unwrap_or_default(),
                id: record.id,
                name: record.name,
                description: record.description,
            })
            .collect();
        Ok(Outcome::Done(features))
    }
}
