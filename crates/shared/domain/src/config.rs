use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration of a Switcharoo deployment.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfigInner {
    pub logging: LoggingConfig,
    pub store: StoreConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(flatten, default)]
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for AppConfig {
    fn deref_mut(&mut self) -> &mut AppConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Logging setup consumed by the logger crate.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Identifier of the process; also the prefix of rolling log files.
    pub name: String,
    /// Default level (`trace`, `debug`, `info`, `warn`, `error`, `off`).
    pub level: String,
    /// Extra filter directives, e.g. `switcharoo_flags=debug`.
    pub directives: Option<String>,
    pub console: bool,
    /// Directory for rolling log files. No file output when unset.
    pub path: Option<PathBuf>,
    pub json: bool,
    pub max_files: usize,
}

/// Tuning of the transactional store.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// How many times a toggle re-reads and retries after losing a compare-and-set race.
    pub toggle_retries: u32,
    /// Pre-allocated slots per table of the in-memory engine.
    pub initial_capacity: usize,
}

// --- Default ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "switcharoo".to_owned(),
            level: "info".to_owned(),
            directives: None,
            console: true,
            path: None,
            json: false,
            max_files: 10,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { toggle_retries: 8, initial_capacity: 64 }
    }
}
