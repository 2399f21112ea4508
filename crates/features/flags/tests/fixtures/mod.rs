#![allow(dead_code)]

use switcharoo_domain::{EnvironmentId, FeatureId, OwnerId};
use switcharoo_flags::*;
use switcharoo_store::{FlagStore, MemoryStore};

/// Every flag service wired to one store.
#[derive(Debug, Clone)]
pub struct Flags<S = MemoryStore> {
    pub store: S,
    pub owners: OwnerRegistry<S>,
    pub environments: EnvironmentRegistry<S>,
    pub features: FeatureRegistry<S>,
    pub bindings: BindingManager<S>,
    pub toggles: ToggleEngine<S>,
    pub queries: QueryService<S>,
    pub guard: Guard<S>,
}

impl<S: FlagStore> Flags<S> {
    pub fn over(store: S, retries: u32) -> Self {
        Self {
            owners: OwnerRegistry::new(store.clone()),
            environments: EnvironmentRegistry::new(store.clone()),
            features: FeatureRegistry::new(store.clone()),
            bindings: BindingManager::new(store.clone()),
            toggles: ToggleEngine::new(store.clone(), retries),
            queries: QueryService::new(store.clone()),
            guard: Guard::new(store.clone()),
            store,
        }
    }

    /// Registers a fresh owner.
    /// # Panics
    /// * If the registration is rejected or the store fails.
    pub async fn owner(&self) -> OwnerId {
        let owner = OwnerId::new();
        self.owners.register_owner(owner).await.unwrap().into_result().unwrap();
        owner
    }

    pub async fn environment(&self, owner: OwnerId, name: &str) -> EnvironmentId {
        self.environments.add_environment(owner, name).await.unwrap().into_result().unwrap()
    }

    pub async fn feature(&self, owner: OwnerId, name: &str) -> FeatureId {
        self.features.add_feature(owner, name, "").await.unwrap().into_result().unwrap()
    }

    /// Feature `name` bound to a new environment `env`, both owned by `owner`.
    pub async fn bound(&self, owner: OwnerId, name: &str, env: &str) -> (FeatureId, EnvironmentId) {
        let environment = self.environment(owner, env).await;
        let feature = self.feature(owner, name).await;
        self.bindings.bind_environment(feature, environment).await.unwrap().into_result().unwrap();
        (feature, environment)
    }
}

#[must_use]
pub fn setup() -> Flags {
    Flags::over(MemoryStore::default(), 8)
}
