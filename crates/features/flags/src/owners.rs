use crate::error::{FlagError, settle};
use crate::outcome::Outcome;
use switcharoo_domain::OwnerId;
use switcharoo_store::FlagStore;
use tracing::{debug, info, instrument};

/// Provisioning hook for the authentication layer: makes an identity known to the store.
#[derive(Debug, Clone)]
pub struct OwnerRegistry<S> {
    store: S,
}

impl<S: FlagStore> OwnerRegistry<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers `owner` so it can own environments and features.
    ///
    /// # Errors
    /// Returns [`FlagError::Storage`] if the store fails.
    #[instrument(skip(self))]
    pub async fn register_owner(&self, owner: OwnerId) -> Result<Outcome<()>, FlagError> {
        let outcome = settle(self.store.insert_owner(owner).await, "registering owner")?;

        match outcome.rejection() {
            None => info!(%owner, "Owner registered"),
            Some(rejection) => debug!(%owner, %rejection, "Owner registration rejected"),
        }
        Ok(outcome)
    }
}
