use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment variables that override file settings.
pub const ENV_PREFIX: &str = "SWITCHAROO";
/// Config file used when no explicit path is given (extension resolved by the `config` crate).
pub const DEFAULT_CONFIG_FILE: &str = "switcharoo";

/// Custom error type for config loading.
#[switcharoo_derive::switcharoo_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration from a file layered with environment overrides.
///
/// 1. **Base File**: `path`, or `switcharoo` in the working directory. The file is optional:
///    a missing file yields the serde defaults of `T`.
/// 2. **Environment Overrides**: variables prefixed with `SWITCHAROO__`, nested with `__`
///    (e.g. `SWITCHAROO__STORE__TOGGLE_RETRIES=3` maps to `store.toggle_retries`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is malformed or the merged values do not
/// deserialize into `T`.
///
/// # Example
/// ```rust
/// use switcharoo_kernel::config::load_config;
/// use switcharoo_kernel::domain::config::AppConfig;
///
/// let cfg: AppConfig = load_config(Some("does/not/exist")).unwrap();
/// assert_eq!(cfg.store.toggle_retries, 8);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
