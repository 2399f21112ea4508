use crate::error::{FlagError, FlagErrorExt};
use crate::outcome::{Outcome, Rejection, Toggled};
use switcharoo_domain::config::StoreConfig;
use switcharoo_domain::{EnvironmentId, FeatureId, OwnerId};
use switcharoo_store::{CasOutcome, FlagStore, StoreError};
use tracing::{debug, info, instrument, warn};

/// Flips the enabled state of bindings.
///
/// A flip is a compare-and-set keyed on the value just read, so concurrent toggles of the
/// same binding serialise: N toggles always leave the binding at `initial XOR (N odd)`.
/// A lost race re-reads and retries up to `retries` times.
#[derive(Debug, Clone)]
pub struct ToggleEngine<S> {
    store: S,
    retries: u32,
}

impl<S: FlagStore> ToggleEngine<S> {
    pub const fn new(store: S, retries: u32) -> Self {
        Self { store, retries }
    }

    pub const fn from_config(store: S, config: &StoreConfig) -> Self {
        Self::new(store, config.toggle_retries)
    }

    /// Flips the binding of `feature` to `environment` and returns the new state.
    ///
    /// `caller` is only recorded on the span; authorization is the caller's concern.
    /// A feature that exists but is not bound to `environment` is rejected exactly like an
    /// unknown feature, with [`Rejection::FeatureNotFound`].
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails, or with [`StoreError::Contention`]
    /// when every retry lost against a concurrent writer.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        feature: FeatureId,
        environment: EnvironmentId,
        caller: OwnerId,
    ) -> Result<Outcome<Toggled>, FlagError> {
        let mut attempt = 0_u32;
        loop {
            let Some(binding) =
                self.store.find_binding(feature, environment).await.context("reading binding")?
            else {
                return Ok(not_found(feature, environment));
            };

            let next = !binding.enabled;
            match self
                .store
                .compare_and_set_enabled(binding.id, binding.enabled, next)
                .await
                .context("flipping binding")?
            {
                CasOutcome::Applied => {
                    info!(%feature, %environment, enabled = next, "Binding toggled");
                    return Ok(Outcome::Done(Toggled { enabled: next, changed: true }));
                },
                CasOutcome::Missing => return Ok(not_found(feature, environment)),
                CasOutcome::Stale { current } => {
                    if attempt >= self.retries {
                        warn!(%feature, %environment, attempts = attempt + 1, "Toggle gave up");
                        return Err(FlagError::Storage {
                            source: StoreError::Contention {
                                message: format!("binding {} kept changing", binding.id).into(),
                                context: None,
                            },
                            context: Some("flipping binding".into()),
                        });
                    }
                    attempt += 1;
                    debug!(attempt, current, "Toggle lost a race, retrying");
                    tokio::task::yield_now().await;
                },
            }
        }
    }
}

/// A feature without a binding to the environment answers as an unknown feature.
fn not_found(feature: FeatureId, environment: EnvironmentId) -> Outcome<Toggled> {
    debug!(%feature, %environment, "Toggle rejected, no binding");
    Rejection::FeatureNotFound.into()
}
