//! # Mediator Configuration
//!
//! Process-wide settings for the mediator, loaded once at startup.
//!
//! ## Sources
//!
//! - Explicit file via [`MediatorConfig::from_file`] (format picked from the extension)
//! - [`MediatorConfig::from_env`] / [`MediatorConfig::from_directory`]: optional
//!   `<dir>/<environment>.toml` (`config/` for `from_env`), then
//!   `MEDIATOR_*` environment variables using `__` to separate nested keys
//!   (`MEDIATOR_LOGGING__LEVEL=debug`, `MEDIATOR_MISSING_BUS=reject`)
//!
//! Every field has a default, so an empty source yields [`MediatorConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// What `publish(.., send_to_bus = true, ..)` does when no event bus is configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingBusPolicy {
    /// Succeed and report [`BusDelivery::NoBusConfigured`](crate::BusDelivery::NoBusConfigured).
    #[default]
    Ignore,
    /// Fail with [`MediatorError::BusNotConfigured`](crate::MediatorError::BusNotConfigured).
    Reject,
}

/// Settings for [`LoggingBehavior`](crate::LoggingBehavior) and
/// [`init_structured_logging`](crate::logging::init_structured_logging).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Record Debug renderings of requests and responses.
    pub include_payloads: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            include_payloads: false,
        }
    }
}

/// Root mediator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MediatorConfig {
    pub missing_bus: MissingBusPolicy,
    pub logging: LoggingConfig,
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl MediatorConfig {
    /// Load from a single file. The file must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading mediator configuration file");

        let config: Self = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `config/<environment>.toml` (if present) overlaid with
    /// `MEDIATOR_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_directory("config")
    }

    /// Load from `<config_dir>/<environment>.toml` (if present) overlaid with
    /// `MEDIATOR_*` environment variables.
    pub fn from_directory(config_dir: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let environment = detect_environment();
        let file = config_dir.as_ref().join(&environment);
        debug!(
            environment = %environment,
            file = %file.display(),
            "Loading mediator configuration"
        );

        let config: Self = config::Config::builder()
            .add_source(config::File::from(file).required(false))
            .add_source(
                config::Environment::with_prefix("MEDIATOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks that `logging.level` is a usable filter.
    ///
    /// Accepts `EnvFilter` directives whose level, bare or after `target=`, is
    /// a level name (`off`, `error`, `warn`, `info`, `debug`, `trace`). A bare
    /// target such as `my_crate` is rejected as an unknown level.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let level = self.logging.level.trim();
        if level.is_empty() {
            return Err(invalid_level("must not be empty"));
        }

        let unknown = level
            .split(',')
            .map(str::trim)
            .filter(|directive| !directive.is_empty() && !directive.ends_with(']'))
            .find(|directive| {
                let name = directive.rsplit_once('=').map_or(*directive, |(_, name)| name);
                !name.is_empty() && name.parse::<LevelFilter>().is_err()
            });
        if let Some(directive) = unknown {
            return Err(invalid_level(format!("unknown level '{directive}'")));
        }

        EnvFilter::try_new(level).map_err(|e| invalid_level(e.to_string()))?;
        Ok(())
    }
}

fn invalid_level(reason: impl Into<String>) -> ConfigurationError {
    ConfigurationError::InvalidValue {
        field: "logging.level".to_string(),
        reason: reason.into(),
    }
}

/// Current environment name from `MEDIATOR_ENV`, then `APP_ENV`, else `development`.
pub fn detect_environment() -> String {
    std::env::var("MEDIATOR_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}
