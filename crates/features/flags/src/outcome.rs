use serde::Serialize;
use std::fmt;

/// Coarse classification of a [`Rejection`], for callers mapping outcomes to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RejectionKind {
    NotFound,
    Conflict,
    Unauthorized,
}

/// An expected business failure of a flag operation.
///
/// Rejections are not errors: the store worked, the request simply cannot be honoured.
/// Each variant maps to a stable [`reason`](Self::reason) string that clients match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rejection {
    OwnerNotFound,
    FeatureNotFound,
    EnvironmentNotFound,
    /// Unbinding a pair that is not bound.
    BindingNotFound,
    DuplicateOwner,
    DuplicateFeature,
    DuplicateEnvironment,
    DuplicateBinding,
    Unauthorized,
}

impl Rejection {
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::OwnerNotFound => "User not found",
            Self::FeatureNotFound => "Feature not found",
            Self::EnvironmentNotFound | Self::BindingNotFound => "Environment not found",
            Self::DuplicateOwner => "User already exists",
            Self::DuplicateFeature => "Feature already exists",
            Self::DuplicateEnvironment | Self::DuplicateBinding => "Environment already exists",
            Self::Unauthorized => "Unauthorized",
        }
    }

    #[must_use]
    pub const fn kind(self) -> RejectionKind {
        match self {
            Self::OwnerNotFound
            | Self::FeatureNotFound
            | Self::EnvironmentNotFound
            | Self::BindingNotFound => RejectionKind::NotFound,
            Self::DuplicateOwner
            | Self::DuplicateFeature
            | Self::DuplicateEnvironment
            | Self::DuplicateBinding => RejectionKind::Conflict,
            Self::Unauthorized => RejectionKind::Unauthorized,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

impl std::error::Error for Rejection {}

/// Result of a flag operation that reached the store: done, or rejected for a business reason.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome<T> {
    Done(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// The rejection reason, or `""` on success.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Done(_) => "",
            Self::Rejected(rejection) => rejection.reason(),
        }
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Done(_) => None,
            Self::Rejected(rejection) => Some(*rejection),
        }
    }

    #[must_use]
    pub fn done(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    /// Converts into a plain `Result`, treating the rejection as the error.
    ///
    /// # Errors
    /// Returns the [`Rejection`] if the operation was rejected.
    pub fn into_result(self) -> Result<T, Rejection> {
        match self {
            Self::Done(value) => Ok(value),
            Self::Rejected(rejection) => Err(rejection),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Done(value) => Outcome::Done(f(value)),
            Self::Rejected(rejection) => Outcome::Rejected(rejection),
        }
    }
}

impl<T> From<Rejection> for Outcome<T> {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}

/// New state of a binding after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Toggled {
    pub enabled: bool,
    pub changed: bool,
}

/// Answer of the query path: whether a feature is bound to an environment and active there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureState {
    pub active: bool,
    pub found: bool,
}

impl FeatureState {
    /// No feature of that name is bound to the environment.
    pub const UNKNOWN: Self = Self { active: false, found: false };
}
