use crate::error::SwitcharooError;
use std::path::PathBuf;
use switcharoo_domain::config::AppConfig;
use switcharoo_domain::{EnvironmentId, FeatureId, OwnerId};
use switcharoo_flags::{
    BindingManager, EnvironmentRegistry, FeatureRegistry, FeatureState, FlagError, Guard, Outcome,
    OwnerRegistry, QueryService, Rejection, ToggleEngine, Toggled,
};
use switcharoo_kernel::config::load_config;
use switcharoo_kernel::security::keys::KeyGuard;
use switcharoo_store::{FlagStore, MemoryStore};
use tracing::{debug, info, instrument};

/// One handle over a store and every flag service built on it.
///
/// Cheap to clone; clones share the store. The plain services do no ownership checks;
/// the `*_as` methods gate a mutation on the [`Guard`] and answer
/// [`Rejection::Unauthorized`] when it says no, including for resources that do not exist.
#[switcharoo_derive::shared]
pub struct Switcharoo<S: FlagStore = MemoryStore> {
    config: AppConfig,
    store: S,
    owners: OwnerRegistry<S>,
    environments: EnvironmentRegistry<S>,
    features: FeatureRegistry<S>,
    bindings: BindingManager<S>,
    toggles: ToggleEngine<S>,
    queries: QueryService<S>,
    guard: Guard<S>,
}

impl Switcharoo {
    #[must_use]
    pub fn builder() -> SwitcharooBuilder {
        SwitcharooBuilder::default()
    }
}

impl<S: FlagStore> Switcharoo<S> {
    /// Wires every service to `store`.
    pub fn with_store(config: AppConfig, store: S) -> Self {
        let toggles = ToggleEngine::from_config(store.clone(), &config.store);
        Self::new(SwitcharooInner {
            owners: OwnerRegistry::new(store.clone()),
            environments: EnvironmentRegistry::new(store.clone()),
            features: FeatureRegistry::new(store.clone()),
            bindings: BindingManager::new(store.clone()),
            toggles,
            queries: QueryService::new(store.clone()),
            guard: Guard::new(store.clone()),
            store,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn owners(&self) -> &OwnerRegistry<S> {
        &self.owners
    }

    #[must_use]
    pub fn environments(&self) -> &EnvironmentRegistry<S> {
        &self.environments
    }

    #[must_use]
    pub fn features(&self) -> &FeatureRegistry<S> {
        &self.features
    }

    #[must_use]
    pub fn bindings(&self) -> &BindingManager<S> {
        &self.bindings
    }

    #[must_use]
    pub fn toggles(&self) -> &ToggleEngine<S> {
        &self.toggles
    }

    #[must_use]
    pub fn queries(&self) -> &QueryService<S> {
        &self.queries
    }

    #[must_use]
    pub fn guard(&self) -> &Guard<S> {
        &self.guard
    }

    /// Toggles on behalf of `owner`, who must own the feature.
    ///
    /// # Errors
    /// Returns [`FlagError`] if the store fails.
    #[instrument(skip(self))]
    pub async fn toggle_as(
        &self,
        owner: OwnerId,
        feature: FeatureId,
        environment: EnvironmentId,
    ) -> Result<Outcome<Toggled>, FlagError> {
        if !self.guard.is_feature_admin(feature, owner).await? {
            return Ok(unauthorized(owner));
        }
        self.toggles.toggle(feature, environment, owner).await
    }

    /// Deletes a feature on behalf of `owner`, who must own it.
    ///
    /// # Errors
    /// Returns [`FlagError`] if the store fails.
    #[instrument(skip(self))]
    pub async fn delete_feature_as(
        &self,
        owner: OwnerId,
        feature: FeatureId,
    ) -> Result<Outcome<()>, FlagError> {
        if !self.guard.is_feature_admin(feature, owner).await? {
            return Ok(unauthorized(owner));
        }
        self.features.delete_feature(feature).await
    }

    /// Binds on behalf of `owner`, who must own both the feature and the environment.
    ///
    /// # Errors
    /// Returns [`FlagError`] if the store fails.
    #[instrument(skip(self))]
    pub async fn bind_environment_as(
        &self,
        owner: OwnerId,
        feature: FeatureId,
        environment: EnvironmentId,
    ) -> Result<Outcome<switcharoo_domain::BindingId>, FlagError> {
        if !self.guard.is_feature_admin(feature, owner).await?
            || !self.guard.is_environment_admin(environment, owner).await?
        {
            return Ok(unauthorized(owner));
        }
        self.bindings.bind_environment(feature, environment).await
    }

    /// Unbinds on behalf of `owner`, who must own the feature.
    ///
    /// # Errors
    /// Returns [`FlagError`] if the store fails.
    #[instrument(skip(self))]
    pub async fn unbind_environment_as(
        &self,
        owner: OwnerId,
        feature: FeatureId,
        environment: EnvironmentId,
    ) -> Result<Outcome<()>, FlagError> {
        if !self.guard.is_feature_admin(feature, owner).await? {
            return Ok(unauthorized(owner));
        }
        self.bindings.unbind_environment(feature, environment).await
    }

    /// Deletes an environment on behalf of `owner`, who must own it.
    ///
    /// # Errors
    /// Returns [`FlagError`] if the store fails.
    #[instrument(skip(self))]
    pub async fn delete_environment_as(
        &self,
        owner: OwnerId,
        environment: EnvironmentId,
    ) -> Result<Outcome<()>, FlagError> {
        if !self.guard.is_environment_admin(environment, owner).await? {
            return Ok(unauthorized(owner));
        }
        self.environments.delete_environment(environment).await
    }

    /// [`toggle_as`](Self::toggle_as) for keys received as strings, bare or table-prefixed.
    ///
    /// # Errors
    /// Returns [`SwitcharooError::Key`] if a key is malformed or names another table, and
    /// [`SwitcharooError::Flags`] if the store fails.
    #[instrument(skip(self))]
    pub async fn toggle_by_key(
        &self,
        owner: &str,
        feature: &str,
        environment: &str,
    ) -> Result<Outcome<Toggled>, SwitcharooError> {
        let owner: OwnerId = KeyGuard::parse(owner)?;
        let feature: FeatureId = KeyGuard::parse(feature)?;
        let environment: EnvironmentId = KeyGuard::parse(environment)?;

        Ok(self.toggle_as(owner, feature, environment).await?)
    }

    /// [`feature_state`](QueryService::feature_state) for an environment key received as a
    /// string.
    ///
    /// # Errors
    /// Returns [`SwitcharooError::Key`] if the key does not parse as an environment key, and
    /// [`SwitcharooError::Flags`] if the store fails.
    #[instrument(skip(self), level = "trace")]
    pub async fn feature_state_by_key(
        &self,
        feature_name: &str,
        environment: &str,
    ) -> Result<FeatureState, SwitcharooError> {
        let environment: EnvironmentId = KeyGuard::parse(environment)?;
        Ok(self.queries.feature_state(feature_name, environment).await?)
    }
}

fn unauthorized<T>(owner: OwnerId) -> Outcome<T> {
    debug!(%owner, "Guard refused the caller");
    Rejection::Unauthorized.into()
}

/// Assembles a [`Switcharoo`] over a [`MemoryStore`].
///
/// Without an explicit config the builder loads one with
/// [`load_config`](switcharoo_kernel::config::load_config): the given file (or
/// `switcharoo.*` in the working directory) layered with `SWITCHAROO__*` variables.
#[derive(Debug, Default)]
pub struct SwitcharooBuilder {
    config: Option<AppConfig>,
    config_file: Option<PathBuf>,
}

impl SwitcharooBuilder {
    /// Uses `config` as is; no file or environment lookup happens.
    #[must_use]
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// # Errors
    /// Returns [`SwitcharooError::Config`] if the config cannot be loaded.
    pub fn build(self) -> Result<Switcharoo, SwitcharooError> {
        let config = match self.config {
            Some(config) => config,
            None => load_config(self.config_file)?,
        };

        let store = MemoryStore::from_config(&config.store);
        info!(
            toggle_retries = config.store.toggle_retries,
            capacity = config.store.initial_capacity,
            "Switcharoo assembled over the memory store"
        );
        Ok(Switcharoo::with_store(config, store))
    }
}
