use crate::error::StoreError;
use crate::records::{BindingRecord, BoundEnvironment, CasOutcome, EnvironmentRecord, FeatureRecord};
use std::fmt::Debug;
use std::future::Future;
use switcharoo_domain::{BindingId, EnvironmentId, FeatureId, OwnerId};

/// Contract of a transactional store holding owners, environments, features and bindings.
///
/// Every method is one atomic step against the store: no caller ever observes a
/// half-applied write. Engines must enforce the unique indexes listed in
/// [`Index`](crate::Index) and the parent references of each table, reporting
/// violations as [`StoreError::UniqueViolation`] and [`StoreError::MissingReference`]
/// so that callers can translate them into business outcomes.
///
/// Handles are cheap to clone and shared between concurrent tasks.
pub trait FlagStore: Clone + Debug + Send + Sync + 'static {
    /// Registers an owner key.
    ///
    /// # Errors
    /// [`StoreError::UniqueViolation`] on [`Index::OwnerKey`](crate::Index::OwnerKey)
    /// if the owner already exists.
    fn insert_owner(&self, owner: OwnerId) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn owner_exists(&self, owner: OwnerId) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Inserts an environment.
    ///
    /// # Errors
    /// [`StoreError::MissingReference`] if the owner is unknown,
    /// [`StoreError::UniqueViolation`] if the owner already has an environment with that name.
    fn insert_environment(
        &self,
        record: EnvironmentRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn find_environment(
        &self,
        id: EnvironmentId,
    ) -> impl Future<Output = Result<Option<EnvironmentRecord>, StoreError>> + Send;

    fn find_environment_by_name(
        &self,
        owner: OwnerId,
        name: &str,
    ) -> impl Future<Output = Result<Option<EnvironmentRecord>, StoreError>> + Send;

    /// All environments of an owner.
    fn environments_of(
        &self,
        owner: OwnerId,
    ) -> impl Future<Output = Result<Vec<EnvironmentRecord>, StoreError>> + Send;

    /// Deletes an environment together with every binding that references it.
    /// Returns `false` if there was nothing to delete.
    fn delete_environment(
        &self,
        id: EnvironmentId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Inserts a feature.
    ///
    /// # Errors
    /// [`StoreError::MissingReference`] if the owner is unknown,
    /// [`StoreError::UniqueViolation`] if the owner already has a feature with that name.
    fn insert_feature(
        &self,
        record: FeatureRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn find_feature(
        &self,
        id: FeatureId,
    ) -> impl Future<Output = Result<Option<FeatureRecord>, StoreError>> + Send;

    fn find_feature_by_name(
        &self,
        owner: OwnerId,
        name: &str,
    ) -> impl Future<Output = Result<Option<FeatureRecord>, StoreError>> + Send;

    /// All features of an owner, without their bindings.
    fn features_of(
        &self,
        owner: OwnerId,
    ) -> impl Future<Output = Result<Vec<FeatureRecord>, StoreError>> + Send;

    /// Deletes a feature together with all of its bindings.
    /// Returns `false` if there was nothing to delete.
    fn delete_feature(&self, id: FeatureId) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Inserts a binding.
    ///
    /// # Errors
    /// [`StoreError::MissingReference`] if the feature or the environment is gone, or the
    /// environment belongs to another owner than the feature,
    /// [`StoreError::UniqueViolation`] if the pair is already bound.
    fn insert_binding(
        &self,
        record: BindingRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// The binding of one (feature, environment) pair.
    fn find_binding(
        &self,
        feature: FeatureId,
        environment: EnvironmentId,
    ) -> impl Future<Output = Result<Option<BindingRecord>, StoreError>> + Send;

    /// Bindings of the given features joined with their environments.
    fn bindings_of(
        &self,
        features: &[FeatureId],
    ) -> impl Future<Output = Result<Vec<BoundEnvironment>, StoreError>> + Send;

    /// The binding to `environment` of a feature named exactly `feature_name`.
    fn find_bound_feature(
        &self,
        feature_name: &str,
        environment: EnvironmentId,
    ) -> impl Future<Output = Result<Option<BindingRecord>, StoreError>> + Send;

    /// Deletes the binding of one (feature, environment) pair.
    /// Returns `false` if the pair was not bound.
    fn delete_binding(
        &self,
        feature: FeatureId,
        environment: EnvironmentId,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Sets `enabled = next` only if the stored value still equals `expected`.
    fn compare_and_set_enabled(
        &self,
        binding: BindingId,
        expected: bool,
        next: bool,
    ) -> impl Future<Output = Result<CasOutcome, StoreError>> + Send;
}
