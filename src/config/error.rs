//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid territory provider endpoint")]
    InvalidProviderEndpoint,

    #[error("Territory provider endpoint must use HTTPS in production")]
    ProviderEndpointMustBeHttps,

    #[error("Territory provider max_retries exceeds 5")]
    TooManyRetries,

    #[error("Provider retry budget ({provider_secs}s) exceeds request timeout ({request_secs}s)")]
    ProviderTimeoutExceedsRequest { provider_secs: u64, request_secs: u64 },
}
