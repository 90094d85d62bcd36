//! Application configuration module
//!
//! Configuration is loaded from environment variables with the `SITE_SIGNAL`
//! prefix using the `config` and `dotenvy` crates. Nested values are
//! separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use site_signal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod server;
mod territory;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use territory::{TerritoryConfig, RETRY_BASE_DELAY_SECS};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL; `None` runs on in-memory repositories
    #[serde(default)]
    pub database: Option<DatabaseConfig>,

    /// External territory scoring; `None` uses the mock provider
    #[serde(default)]
    pub territory: Option<TerritoryConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `SITE_SIGNAL__*` variables:
    ///
    /// - `SITE_SIGNAL__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SITE_SIGNAL__DATABASE__URL=...` -> `database.url = ...`
    /// - `SITE_SIGNAL__TERRITORY__API_KEY=...` -> `territory.api_key = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SITE_SIGNAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        if let Some(territory) = &self.territory {
            territory.validate(&self.server.environment)?;
            // A provider call that outlives the request is cut off by the timeout layer.
            if territory.worst_case_secs() > self.server.request_timeout_secs {
                return Err(ValidationError::ProviderTimeoutExceedsRequest {
                    provider_secs: territory.worst_case_secs(),
                    request_secs: self.server.request_timeout_secs,
                });
            }
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
