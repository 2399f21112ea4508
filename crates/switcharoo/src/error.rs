use std::borrow::Cow;
use switcharoo_flags::FlagError;
use switcharoo_kernel::config::ConfigError;
use switcharoo_kernel::security::keys::KeyError;
use switcharoo_logger::LoggerError;

/// Errors surfaced while assembling or running a [`Switcharoo`](crate::Switcharoo) handle.
#[switcharoo_derive::switcharoo_error]
pub enum SwitcharooError {
    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Invalid key{}: {source}", format_context(.context))]
    Key { source: KeyError, context: Option<Cow<'static, str>> },

    #[error("Flag service error{}: {source}", format_context(.context))]
    Flags { source: FlagError, context: Option<Cow<'static, str>> },

    #[error("Logger error{}: {source}", format_context(.context))]
    Logger { source: LoggerError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
