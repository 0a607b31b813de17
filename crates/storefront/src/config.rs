//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `OPTICA_API_BASE_URL` - Base URL of the backend REST API
//!   (e.g., `http://localhost:8081/api`)
//!
//! ## Optional
//! - `OPTICA_USER_ID` - User id sent as the `X-User-Id` header (default: 1)
//! - `OPTICA_SNAPSHOT_DIR` - Directory for local fallback snapshots
//!   (default: `.optica`)
//! - `OPTICA_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `OPTICA_CATALOG_CACHE_CAPACITY` - Max entries in the catalog cache
//!   (default: 1000)

use std::path::PathBuf;
use std::time::Duration;

use optica_core::UserId;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront session configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the backend REST API.
    pub api_base_url: Url,
    /// User identity attached to every request. Authentication is a stub:
    /// the backend trusts the `X-User-Id` header.
    pub user_id: UserId,
    /// Directory holding the cart and last-order JSON snapshots.
    pub snapshot_dir: PathBuf,
    /// HTTP request timeout.
    pub http_timeout: Duration,
    /// Maximum entries in the catalog cache (no TTL; capacity-bounded only).
    pub catalog_cache_capacity: u64,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("OPTICA_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("OPTICA_API_BASE_URL".to_string(), e.to_string())
            })?;
        let user_id = get_env_or_default("OPTICA_USER_ID", "1")
            .parse::<i32>()
            .map(UserId::new)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("OPTICA_USER_ID".to_string(), e.to_string())
            })?;
        let snapshot_dir = PathBuf::from(get_env_or_default("OPTICA_SNAPSHOT_DIR", ".optica"));
        let http_timeout = get_env_or_default("OPTICA_HTTP_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("OPTICA_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        let catalog_cache_capacity = get_env_or_default("OPTICA_CATALOG_CACHE_CAPACITY", "1000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "OPTICA_CATALOG_CACHE_CAPACITY".to_string(),
                    e.to_string(),
                )
            })?;

        Ok(Self {
            api_base_url,
            user_id,
            snapshot_dir,
            http_timeout,
            catalog_cache_capacity,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_or_default_returns_default_when_unset() {
        let value = get_env_or_default("OPTICA_TEST_UNSET_VARIABLE", "fallback");
        assert_eq!(value, "fallback");
    }

    #[test]
    fn test_get_required_env_missing_is_an_error() {
        let err = get_required_env("OPTICA_TEST_UNSET_VARIABLE").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(_)));
        assert_eq!(
            err.to_string(),
            "Missing environment variable: OPTICA_TEST_UNSET_VARIABLE"
        );
    }

    #[test]
    fn test_config_is_constructible_without_env() {
        let config = StorefrontConfig {
            api_base_url: "http://localhost:8081/api".parse().unwrap(),
            user_id: UserId::new(1),
            snapshot_dir: PathBuf::from(".optica"),
            http_timeout: Duration::from_secs(30),
            catalog_cache_capacity: 1000,
        };

        assert_eq!(config.api_base_url.as_str(), "http://localhost:8081/api");
        assert_eq!(config.user_id.as_i32(), 1);
    }
}
