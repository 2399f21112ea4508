use crate::error::{FlagError, FlagErrorExt};
use crate::outcome::FeatureState;
use switcharoo_domain::EnvironmentId;
use switcharoo_store::FlagStore;
use tracing::{instrument, trace};

/// Read path for flag consumers. Unauthenticated: no ownership check.
#[derive(Debug, Clone)]
pub struct QueryService<S> {
    store: S,
}

impl<S: FlagStore> QueryService<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether a feature named exactly `feature_name` is bound to `environment` and active.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(level = "trace", skip(self))]
    pub async fn feature_state(
        &self,
        feature_name: &str,
        environment: EnvironmentId,
    ) -> Result<FeatureState, FlagError> {
        let binding = self
            .store
            .find_bound_feature(feature_name, environment)
            .await
            .context("querying feature state")?;

        let state = binding.map_or(FeatureState::UNKNOWN, |binding| FeatureState {
            active: binding.enabled,
            found: true,
        });
        trace!(active = state.active, found = state.found, "Feature state resolved");
        Ok(state)
    }
}
