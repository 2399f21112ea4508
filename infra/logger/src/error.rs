use std::borrow::Cow;

/// Errors raised while installing the global subscriber.
#[switcharoo_derive::switcharoo_error]
pub enum LoggerError {
    /// The rolling file appender could not be created (e.g. unwritable directory).
    #[error("Rolling file appender error{}: {source}", format_context(.context))]
    Appender { source: tracing_appender::rolling::InitError, context: Option<Cow<'static, str>> },

    /// A global subscriber is already installed in this process.
    #[error("Tracing subscriber error{}: {source}", format_context(.context))]
    Subscriber {
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },

    /// The settings cannot produce a working subscriber.
    #[error("Invalid logger configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal logger error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
