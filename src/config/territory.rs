//! Territory scoring provider configuration
//!
//! Optional: without it territory scoring uses the built-in mock provider.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// First retry backoff; doubles on each further retry.
pub const RETRY_BASE_DELAY_SECS: u64 = 1;

/// External market scoring service settings
#[derive(Debug, Clone, Deserialize)]
pub struct TerritoryConfig {
    /// Base URL of the scoring service
    pub endpoint: String,

    /// Bearer token sent with every request
    pub api_key: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl TerritoryConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: SecretString::new(api_key.into()),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Longest a scoring call can take: every attempt timing out plus the
    /// backoff sleeps between them.
    pub fn worst_case_secs(&self) -> u64 {
        let attempts = u64::from(self.max_retries) + 1;
        let backoff = RETRY_BASE_DELAY_SECS * (2u64.saturating_pow(self.max_retries) - 1);
        self.timeout_secs.saturating_mul(attempts).saturating_add(backoff)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    /// Validate provider configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ValidationError::MissingRequired("SITE_SIGNAL__TERRITORY__ENDPOINT"));
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidProviderEndpoint);
        }
        if *environment == Environment::Production && !endpoint.starts_with("https://") {
            return Err(ValidationError::ProviderEndpointMustBeHttps);
        }
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("SITE_SIGNAL__TERRITORY__API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > 5 {
            return Err(ValidationError::TooManyRetries);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    15
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TerritoryConfig {
        TerritoryConfig::new("https://scoring.example.com/v1", "tk_live_123")
    }

    #[test]
    fn defaults() {
        let config = config();
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.max_retries, 2);
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn worst_case_counts_every_attempt_and_backoff() {
        let mut config = config();
        // 3 attempts of 15s, then 1s + 2s of backoff
        assert_eq!(config.worst_case_secs(), 48);

        config.max_retries = 0;
        assert_eq!(config.worst_case_secs(), 15);

        config.timeout_secs = 45;
        config.max_retries = 2;
        assert_eq!(config.worst_case_secs(), 138);
    }

    #[test]
    fn http_endpoint_only_allowed_outside_production() {
        let config = TerritoryConfig::new("http://localhost:9000", "key");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::ProviderEndpointMustBeHttps)
        );
    }

    #[test]
    fn blank_api_key_rejected() {
        let config = TerritoryConfig::new("https://scoring.example.com", "  ");
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn bad_endpoint_rejected() {
        let config = TerritoryConfig::new("scoring.example.com", "key");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidProviderEndpoint)
        );
    }

    #[test]
    fn retry_cap() {
        let mut config = config();
        config.max_retries = 9;
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::TooManyRetries)
        );
    }
}
