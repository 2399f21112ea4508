use crate::error::LoggerError;
use crate::{LOG_FILE_SUFFIX, Logger};
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 10;

#[derive(Debug)]
pub(crate) struct Settings {
    pub(crate) console: bool,
    pub(crate) path: Option<PathBuf>,
    pub(crate) level: LevelFilter,
    pub(crate) rotation: Rotation,
    pub(crate) max_files: usize,
    pub(crate) json: bool,
    pub(crate) directives: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            directives: None,
        }
    }
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);
#[derive(Debug)]
pub struct ConsoleOnly;
#[derive(Debug)]
pub struct WithFile;

mod sealed {
    pub trait Sealed {}
}
use sealed::Sealed;

impl Sealed for Unnamed {}
impl Sealed for Named {}
impl Sealed for ConsoleOnly {}
impl Sealed for WithFile {}

/// Typestate builder for the global subscriber.
///
/// A name is required before [`init`](LoggerBuilder::init) becomes available; file-only
/// settings (`max_files`, `rotation`, `json`) unlock once a [`path`](LoggerBuilder::path)
/// is given.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed, F: Sealed = ConsoleOnly> {
    pub(crate) settings: Settings,
    name: N,
    output: PhantomData<F>,
}

impl LoggerBuilder {
    pub(crate) fn new() -> Self {
        Self { settings: Settings::default(), name: Unnamed, output: PhantomData }
    }
}

impl<F: Sealed> LoggerBuilder<Unnamed, F> {
    /// Names the process; also the prefix of rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, F> {
        LoggerBuilder { settings: self.settings, name: Named(name.into()), output: PhantomData }
    }
}

impl<F: Sealed> LoggerBuilder<Named, F> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.settings.level = level;
        self
    }

    /// Extra filter directives (e.g. `switcharoo_flags=debug`) on top of the default level.
    ///
    /// `RUST_LOG` is only consulted when no directives are given. Malformed directives make
    /// [`init`](Self::init) fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.settings.directives = Some(directives.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.settings.console = enabled;
        self
    }

    /// Writes rolling log files into `path`, creating it if needed.
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<Named, WithFile> {
        let mut settings = self.settings;
        settings.path = Some(path.into());
        LoggerBuilder { settings, name: self.name, output: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// The returned [`Logger`] owns the file writer's worker guard; keep it alive until
    /// shutdown or buffered lines are lost.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for unusable settings,
    /// [`LoggerError::Appender`] if the log directory cannot be used,
    /// [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { settings, name: Named(name), .. } = self;
        validate(&settings, &name)?;

        let filter = env_filter(&settings)?;
        let mut layers = Vec::new();

        if settings.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = if let Some(path) = settings.path {
            fs::create_dir_all(&path).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create log directory {}", path.display()).into()),
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(settings.rotation)
                .filename_prefix(&name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(settings.max_files)
                .build(path)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let file = layer().with_writer(writer).with_ansi(false);
            layers.push(if settings.json { file.json().boxed() } else { file.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No output enabled. Enable the console or set a log path.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        Ok(Logger::with_guard(guard))
    }
}

impl LoggerBuilder<Named, WithFile> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.settings.max_files = max;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.settings.rotation = rotation;
        self
    }

    /// Writes log files as JSON lines. The console stays human readable.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self) -> Self {
        self.settings.json = true;
        self
    }
}

fn validate(settings: &Settings, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }
    if settings.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }
    Ok(())
}

fn env_filter(settings: &Settings) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(settings.level.into());
    settings.directives.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |directives| {
            builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid filter directives '{directives}': {e}").into(),
                context: None,
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let builder = LoggerBuilder::new().name("switcharoo-test").directives("switcharoo=debug");

        assert!(builder.settings.console);
        assert_eq!(builder.settings.level, LevelFilter::INFO);
        assert_eq!(builder.settings.directives.as_deref(), Some("switcharoo=debug"));
        assert!(builder.settings.path.is_none());
    }

    #[test]
    fn file_settings_follow_the_path() {
        let builder = LoggerBuilder::new()
            .name("switcharoo-test")
            .level(LevelFilter::DEBUG)
            .path("/tmp/switcharoo-logs")
            .max_files(3)
            .json();

        assert_eq!(builder.settings.level, LevelFilter::DEBUG);
        assert_eq!(builder.settings.max_files, 3);
        assert!(builder.settings.json);
        assert!(builder.settings.path.is_some());
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = validate(&Settings::default(), "  ").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn malformed_directives_are_rejected() {
        let settings = Settings { directives: Some("switcharoo=loud".to_owned()), ..Settings::default() };
        assert!(env_filter(&settings).is_err());
    }

    #[test]
    fn zero_max_files_is_rejected() {
        let settings = Settings { max_files: 0, ..Settings::default() };
        assert!(validate(&settings, "switcharoo").is_err());
    }
}
