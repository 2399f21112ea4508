//! Typed UUID keys.
//!
//! Every entity is addressed by its own key type so that a feature key can never be
//! passed where an environment key is expected. Keys serialize as the bare hyphenated UUID.

use crate::constants::{BINDING, ENVIRONMENT, FEATURE, OWNER};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_key {
    ($(#[$meta:meta])* $name:ident, $table:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Table this key belongs to.
            pub const TABLE: &'static str = $table;

            /// Generates a fresh random (v4) key.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

entity_key!(
    /// Identity of an authenticated owner, as handed over by the identity provider.
    OwnerId,
    OWNER
);
entity_key!(
    /// Key of a deployment environment.
    EnvironmentId,
    ENVIRONMENT
);
entity_key!(
    /// Key of a feature flag.
    FeatureId,
    FEATURE
);
entity_key!(
    /// Key of a feature-environment binding.
    BindingId,
    BINDING
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_display_as_bare_uuid() {
        let uuid = Uuid::new_v4();
        let key = FeatureId::from_uuid(uuid);
        assert_eq!(key.to_string(), uuid.to_string());
        assert_eq!(key.to_string().parse::<FeatureId>().unwrap(), key);
    }

    #[test]
    fn fresh_keys_are_distinct() {
        assert_ne!(EnvironmentId::new(), EnvironmentId::new());
    }

    #[test]
    fn malformed_key_is_rejected() {
        assert!("not-a-uuid".parse::<OwnerId>().is_err());
    }
}
