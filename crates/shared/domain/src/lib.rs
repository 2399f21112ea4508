//! # Domain Models
//!
//! Pure data shapes shared by the store, the flag services and the facade:
//! typed keys, entities and configuration sections.
//! Keep it lean: no I/O, no locking and no business rules here.

pub mod config;
pub mod constants;
pub mod entities;
pub mod keys;

pub use entities::{Binding, Environment, Feature};
pub use keys::{BindingId, EnvironmentId, FeatureId, OwnerId};
