//! # Flags
//!
//! State-mutation and query logic of Switcharoo: how features, environments and their
//! bindings are created, linked, toggled and torn down, plus the ownership predicates that
//! gate mutation.
//!
//! Every service holds a cloned [`FlagStore`](switcharoo_store::FlagStore) handle and
//! returns `Result<Outcome<T>, FlagError>`:
//!
//! * [`Outcome::Done`] when the operation was applied,
//! * [`Outcome::Rejected`] for expected business failures, each with a stable
//!   [`reason`](Rejection::reason),
//! * [`FlagError`] when the store itself failed.
//!
//! Uniqueness is enforced by the store's unique indexes. The registries pre-check to report
//! a precise rejection and translate a violation lost to a concurrent writer into the same
//! rejection, so check-then-insert never races.
//!
//! ## Example
//!
//! ```rust
//! use switcharoo_domain::OwnerId;
//! use switcharoo_flags::{BindingManager, EnvironmentRegistry, FeatureRegistry, OwnerRegistry};
//! use switcharoo_flags::{QueryService, ToggleEngine};
//! use switcharoo_store::MemoryStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::default();
//! let owner = OwnerId::new();
//! OwnerRegistry::new(store.clone()).register_owner(owner).await?.into_result()?;
//!
//! let prod = EnvironmentRegistry::new(store.clone()).add_environment(owner, "prod").await?.into_result()?;
//! let dark = FeatureRegistry::new(store.clone())
//!     .add_feature(owner, "dark-mode", "Dark colour scheme")
//!     .await?
//!     .into_result()?;
//! BindingManager::new(store.clone()).bind_environment(dark, prod).await?.into_result()?;
//!
//! let toggled = ToggleEngine::new(store.clone(), 8).toggle(dark, prod, owner).await?.into_result()?;
//! assert!(toggled.enabled);
//!
//! let state = QueryService::new(store).feature_state("dark-mode", prod).await?;
//! assert!(state.active && state.found);
//! # Ok(())
//! # }
//! ```

mod bindings;
mod environments;
mod error;
mod features;
mod guard;
mod outcome;
mod owners;
mod query;
mod toggle;

pub use crate::bindings::BindingManager;
pub use crate::environments::EnvironmentRegistry;
pub use crate::error::{FlagError, FlagErrorExt};
pub use crate::features::FeatureRegistry;
pub use crate::guard::Guard;
pub use crate::outcome::{FeatureState, Outcome, Rejection, RejectionKind, Toggled};
pub use crate::owners::OwnerRegistry;
pub use crate::query::QueryService;
pub use crate::toggle::ToggleEngine;
