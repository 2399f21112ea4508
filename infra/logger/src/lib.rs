//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for Switcharoo: an `EnvFilter`, a compact
//! console layer and an optional rolling, non-blocking file layer (plain or JSON lines).
//!
//! Build it with the typestate [`LoggerBuilder`], or straight from the `[logging]` section of
//! the application config with [`Logger::from_config`].
//!
//! ## Example
//!
//! ```rust
//! # use switcharoo_logger::{LevelFilter, Logger};
//! let _logger = Logger::builder()
//!     .name("switcharoo")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .directives("switcharoo_store=info")
//!     .init()
//!     .unwrap();
//! ```

mod builder;
mod error;

pub use crate::builder::{ConsoleOnly, LoggerBuilder, Named, Unnamed, WithFile};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use switcharoo_domain::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_SUFFIX: &str = "log";

/// Handle to the installed subscriber.
///
/// Holds the worker guard of the file writer, if any. Dropping it flushes and stops the
/// background writer, so keep it alive until shutdown.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Installs the subscriber described by a [`LoggingConfig`].
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an unknown level or malformed directives,
    /// plus everything [`LoggerBuilder::init`] reports.
    pub fn from_config(config: &LoggingConfig) -> Result<Self, LoggerError> {
        let level = parse_level(&config.level)?;

        let mut builder = Self::builder().name(&config.name).level(level).console(config.console);
        if let Some(directives) = &config.directives {
            builder = builder.directives(directives);
        }

        match &config.path {
            Some(path) => {
                let builder = builder.path(path).max_files(config.max_files);
                if config.json { builder.json().init() } else { builder.init() }
            },
            None => builder.init(),
        }
    }

    pub(crate) const fn with_guard(guard: Option<WorkerGuard>) -> Self {
        Self { guard }
    }

    /// Whether a file writer is attached.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }

    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

/// Parses a level name such as `info` or `WARN`.
///
/// # Errors
/// [`LoggerError::InvalidConfiguration`] if the name is not a level.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid level '{level}': {e}").into(),
        context: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names() {
        assert_eq!(parse_level("debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" WARN ").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
        assert!(parse_level("chatty").is_err());
    }
}
