//! Kernel utilities shared across crates.
//! Keep this crate lightweight: configuration loading and boundary key parsing only.
//!
//! ## Key parsing
//! ```rust
//! use switcharoo_kernel::domain::FeatureId;
//! use switcharoo_kernel::security::keys::KeyGuard;
//!
//! let key: FeatureId = KeyGuard::parse("feature:67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
//! assert_eq!(key.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use switcharoo_kernel::config::load_config;
//! use switcharoo_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("switcharoo")).unwrap();
//! ```
pub mod config;
pub mod security;

pub use switcharoo_domain as domain;
