use std::borrow::Cow;
use std::str::FromStr;
use switcharoo_domain::constants::{BINDING, ENVIRONMENT, FEATURE, OWNER};
use switcharoo_domain::{BindingId, EnvironmentId, FeatureId, OwnerId};
use uuid::Uuid;

#[switcharoo_derive::switcharoo_error]
pub enum KeyError {
    #[error("Key belongs to another table{}: {message}", format_context(.context))]
    TableMismatch { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Malformed key{}: {source}", format_context(.context))]
    Malformed { source: uuid::Error, context: Option<Cow<'static, str>> },
}

/// A typed key that belongs to a single table of the logical schema.
pub trait TableKey: From<Uuid> {
    const TABLE: &'static str;
}

impl TableKey for OwnerId {
    const TABLE: &'static str = OWNER;
}
impl TableKey for EnvironmentId {
    const TABLE: &'static str = ENVIRONMENT;
}
impl TableKey for FeatureId {
    const TABLE: &'static str = FEATURE;
}
impl TableKey for BindingId {
    const TABLE: &'static str = BINDING;
}

/// Parses opaque key strings received from callers into typed keys.
#[derive(Debug)]
pub struct KeyGuard;

impl KeyGuard {
    /// Parses `raw` as a key of table `K`.
    ///
    /// Accepts the bare UUID (`"67e5..."`) or the table-prefixed form (`"feature:67e5..."`).
    /// A prefix naming another table is refused, so an environment key cannot be passed
    /// where a feature key is expected.
    ///
    /// # Errors
    /// [`KeyError::TableMismatch`] for a foreign prefix, [`KeyError::Malformed`] when the
    /// UUID part does not parse.
    pub fn parse<K: TableKey>(raw: impl AsRef<str>) -> Result<K, KeyError> {
        let raw = raw.as_ref().trim();

        let uuid_part = match raw.split_once(':') {
            Some((table, rest)) if table == K::TABLE => rest,
            Some((table, _)) => {
                return Err(KeyError::TableMismatch {
                    message: format!("Expected '{}', got '{table}'", K::TABLE).into(),
                    context: None,
                });
            },
            None => raw,
        };

        let uuid = Uuid::from_str(uuid_part).context(format!("Parsing {} key", K::TABLE))?;
        Ok(K::from(uuid))
    }
}
