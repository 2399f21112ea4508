//! Facade crate for Switcharoo.
//! Re-exports the domain, kernel, store and flag crates and composes them into one
//! [`Switcharoo`] handle.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//!
//! ```rust
//! use switcharoo::Switcharoo;
//! use switcharoo::domain::OwnerId;
//! use switcharoo::domain::config::AppConfig;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let app = Switcharoo::builder().config(AppConfig::default()).build()?;
//! let owner = OwnerId::new();
//! app.owners().register_owner(owner).await?.into_result()?;
//!
//! let prod = app.environments().add_environment(owner, "prod").await?.into_result()?;
//! let beta = app.features().add_feature(owner, "beta", "").await?.into_result()?;
//! app.bind_environment_as(owner, beta, prod).await?.into_result()?;
//! app.toggle_as(owner, beta, prod).await?.into_result()?;
//!
//! assert!(app.queries().feature_state("beta", prod).await?.active);
//! # Ok(())
//! # }
//! ```

mod app;
mod error;

pub use crate::app::{Switcharoo, SwitcharooBuilder, SwitcharooInner};
pub use crate::error::{SwitcharooError, SwitcharooErrorExt};
pub use switcharoo_domain as domain;
pub use switcharoo_flags as flags;
pub use switcharoo_kernel as kernel;
pub use switcharoo_logger as logger;
pub use switcharoo_store as store;

use switcharoo_domain::config::AppConfig;
use switcharoo_logger::Logger;

/// Installs the global subscriber described by the `[logging]` section of `config`.
///
/// Keep the returned [`Logger`] alive until shutdown.
///
/// # Errors
/// Returns [`SwitcharooError::Logger`] if the settings are invalid or a subscriber is
/// already installed.
pub fn init_logging(config: &AppConfig) -> Result<Logger, SwitcharooError> {
    Ok(Logger::from_config(&config.logging)?)
}
