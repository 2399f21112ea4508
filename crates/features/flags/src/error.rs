use crate::outcome::{Outcome, Rejection};
use std::borrow::Cow;
use switcharoo_store::{Index, StoreError, Table};

/// Failures of the flag services that are not business rejections.
#[switcharoo_derive::switcharoo_error]
pub enum FlagError {
    /// The store failed or refused the operation.
    #[error("Flag store failure{}: {source}", format_context(.context))]
    Storage { source: StoreError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal flag error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// The rejection a constraint violation stands for, if the store reported one.
const fn anticipated(err: &StoreError) -> Option<Rejection> {
    match err {
        StoreError::UniqueViolation { index, .. } => Some(match index {
            Index::OwnerKey => Rejection::DuplicateOwner,
            Index::EnvironmentName => Rejection::DuplicateEnvironment,
            Index::FeatureName => Rejection::DuplicateFeature,
            Index::BindingPair => Rejection::DuplicateBinding,
        }),
        StoreError::MissingReference { table, .. } => match table {
            Table::Owners => Some(Rejection::OwnerNotFound),
            Table::Features => Some(Rejection::FeatureNotFound),
            Table::Environments => Some(Rejection::EnvironmentNotFound),
            Table::Bindings => None,
        },
        _ => None,
    }
}

/// Settles the result of a constrained write.
///
/// Unique and reference violations lost to a concurrent writer become the same rejection a
/// pre-check would have produced; anything else stays a storage failure.
pub(crate) fn settle<T>(
    result: Result<T, StoreError>,
    context: &'static str,
) -> Result<Outcome<T>, FlagError> {
    match result {
        Ok(value) => Ok(Outcome::Done(value)),
        Err(err) => match anticipated(&err) {
            Some(rejection) => Ok(Outcome::Rejected(rejection)),
            None => Err(FlagError::Storage { source: err, context: Some(context.into()) }),
        },
    }
}
