//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the
//! `CONNECT_FOUR` prefix and `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use connect_four::config::AppConfig;
//!
//! let config = AppConfig::load().expect("failed to load configuration");
//! config.validate().expect("invalid configuration");
//!
//! println!("listening on {}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod hub;
mod server;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use hub::HubSettings;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment).
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration. Optional: the service runs with the
    /// in-memory store when absent.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// Hub timings and queue bounds.
    #[serde(default)]
    pub hub: HubSettings,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads a `.env` file when present (development), then environment
    /// variables such as `CONNECT_FOUR__SERVER__PORT=8080` or
    /// `CONNECT_FOUR__DATABASE__URL=postgres://...`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when values cannot be parsed into the
    /// expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONNECT_FOUR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.hub.validate()?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: None,
            hub: HubSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.database.is_none());
    }
}
