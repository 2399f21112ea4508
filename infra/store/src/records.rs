//! Row shapes of the logical schema.
//!
//! ```text
//! owners(id)
//! environments(id, owner_id, name)                   unique (owner_id, name)
//! features(id, owner_id, name, description)          unique (owner_id, name)
//! bindings(id, feature_id, environment_id, enabled)  unique (feature_id, environment_id)
//! ```

use switcharoo_domain::{Binding, BindingId, Environment, EnvironmentId, FeatureId, OwnerId};

/// Tables of the logical schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Table {
    Owners,
    Environments,
    Features,
    Bindings,
}

/// Unique indexes enforced by every engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Index {
    /// `owners(id)`
    OwnerKey,
    /// `environments(owner_id, name)`
    EnvironmentName,
    /// `features(owner_id, name)`
    FeatureName,
    /// `bindings(feature_id, environment_id)`
    BindingPair,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRecord {
    pub id: EnvironmentId,
    pub owner: OwnerId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    pub id: FeatureId,
    pub owner: OwnerId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingRecord {
    pub id: BindingId,
    pub feature: FeatureId,
    pub environment: EnvironmentId,
    pub enabled: bool,
}

/// A binding joined with the environment it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundEnvironment {
    pub binding: BindingRecord,
    pub environment: EnvironmentRecord,
}

/// Result of a conditional update of a binding's `enabled` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// The stored value matched the expectation and was replaced.
    Applied,
    /// Another writer changed the value first; `current` is what is stored now.
    Stale { current: bool },
    /// The binding no longer exists.
    Missing,
}

impl From<EnvironmentRecord> for Environment {
    fn from(record: EnvironmentRecord) -> Self {
        Self { id: record.id, name: record.name }
    }
}

impl From<BoundEnvironment> for Binding {
    fn from(row: BoundEnvironment) -> Self {
        Self {
            id: row.binding.id,
            environment: row.environment.into(),
            enabled: row.binding.enabled,
        }
    }
}
