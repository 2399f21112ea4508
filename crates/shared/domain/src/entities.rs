use crate::keys::{BindingId, EnvironmentId, FeatureId};
use serde::{Deserialize, Serialize};

/// A named deployment context (e.g. `prod`, `staging`) owned by exactly one owner.
///
/// The name is unique within the owner's environments, not globally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Environment {
    pub id: EnvironmentId,
    pub name: String,
}

/// The link between one feature and one environment, carrying the on/off state.
///
/// Bindings start disabled and only change through a toggle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Binding {
    pub id: BindingId,
    pub environment: Environment,
    pub enabled: bool,
}

/// A named flag owned by exactly one owner, with its environment bindings materialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub name: String,
    pub description: String,
    pub bindings: Vec<Binding>,
}

impl Feature {
    /// The binding to `environment`, if the feature is bound to it.
    #[must_use]
    pub fn binding_for(&self, environment: EnvironmentId) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.environment.id == environment)
    }

    /// Whether the feature is bound to `environment` and enabled there.
    #[must_use]
    pub fn is_enabled_in(&self, environment: EnvironmentId) -> bool {
        self.binding_for(environment).is_some_and(|b| b.enabled)
    }
}
