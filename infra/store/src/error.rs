use crate::records::{Index, Table};
use std::borrow::Cow;

/// A specialized [`StoreError`] enum of this crate.
#[switcharoo_derive::switcharoo_error]
pub enum StoreError {
    /// A write would create a second row with the same unique key.
    #[error("Unique index violated{}: {index}", format_context(.context))]
    UniqueViolation { index: Index, context: Option<Cow<'static, str>> },

    /// A write references a parent row that does not exist (anymore).
    #[error("Referenced row is missing{}: {table}", format_context(.context))]
    MissingReference { table: Table, context: Option<Cow<'static, str>> },

    /// Conditional updates kept losing against concurrent writers.
    #[error("Write contention{}: {message}", format_context(.context))]
    Contention { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The engine cannot be reached.
    #[error("Store unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal store error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
