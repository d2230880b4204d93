//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `STUDIOBOOK` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use studiobook::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod engine;
mod error;
mod notify;

pub use database::DatabaseConfig;
pub use engine::EngineConfig;
pub use error::{ConfigError, ValidationError};
pub use notify::{EmailConfig, MessengerConfig, PushConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Engine tuning (lock waits, notification dispatch sizing)
    #[serde(default)]
    pub engine: EngineConfig,

    /// Push channel configuration, when the host enables push
    #[serde(default)]
    pub push: Option<PushConfig>,

    /// Email channel configuration, when the host enables email
    #[serde(default)]
    pub email: Option<EmailConfig>,

    /// Messenger channel configuration, when the host enables messenger
    #[serde(default)]
    pub messenger: Option<MessengerConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables with
    /// the `STUDIOBOOK` prefix. Nested values use `__` as separator:
    ///
    /// - `STUDIOBOOK__DATABASE__URL=...` -> `database.url = ...`
    /// - `STUDIOBOOK__ENGINE__LOCK_WAIT_MS=500` -> `engine.lock_wait_ms = 500`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("STUDIOBOOK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Channel sections are validated only when present; a host that never
    /// enables a channel does not have to configure it.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.database.validate()?;
        self.engine.validate()?;
        if let Some(push) = &self.push {
            push.validate()?;
        }
        if let Some(email) = &self.email {
            email.validate()?;
        }
        if let Some(messenger) = &self.messenger {
            messenger.validate()?;
        }
        Ok(())
    }
}
