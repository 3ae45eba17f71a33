//! Configuration error types.

use thiserror::Error;

/// Failure while loading or deserializing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Semantic validation failure of a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("server port must not be zero")]
    InvalidPort,

    #[error("request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("database url must start with postgres:// or postgresql://")]
    InvalidDatabaseUrl,

    #[error("database pool must allow at least one connection")]
    InvalidPoolSize,

    #[error("outbound queue capacity must not be zero")]
    InvalidCapacity,

    #[error("session max age must not be zero")]
    InvalidMaxAge,
}
