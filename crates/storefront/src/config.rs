//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `PORT` - Listen port (default: 3000). `STOREFRONT_PORT` is accepted as an alias.
//! - `STOREFRONT_HOST` - Bind address (default: 0.0.0.0)
//! - `STOREFRONT_PUBLIC_DIR` - Directory served as the site root (default: `web`)
//! - `STOREFRONT_CATALOG` - Product catalog JSON (default: `<public dir>/catalog.json`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_PORT: &str = "3000";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PUBLIC_DIR: &str = "web";
const CATALOG_FILE_NAME: &str = "catalog.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Root directory for static assets
    pub public_dir: PathBuf,
    /// Product catalog file
    pub catalog_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced by Sentry
    pub sentry_traces_sample_rate: f32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let (port_var, port_value) = get_optional_env("PORT")
            .map(|value| ("PORT", value))
            .or_else(|| get_optional_env("STOREFRONT_PORT").map(|value| ("STOREFRONT_PORT", value)))
            .unwrap_or(("PORT", DEFAULT_PORT.to_string()));
        let port = parse_var(port_var, &port_value)?;

        let host = parse_var(
            "STOREFRONT_HOST",
            &get_env_or_default("STOREFRONT_HOST", DEFAULT_HOST),
        )?;

        let public_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_PUBLIC_DIR",
            DEFAULT_PUBLIC_DIR,
        ));
        let catalog_path = get_optional_env("STOREFRONT_CATALOG")
            .map_or_else(|| public_dir.join(CATALOG_FILE_NAME), PathBuf::from);

        let sentry_sample_rate =
            parse_var("SENTRY_SAMPLE_RATE", &get_env_or_default("SENTRY_SAMPLE_RATE", "1.0"))?;
        let sentry_traces_sample_rate = parse_var(
            "SENTRY_TRACES_SAMPLE_RATE",
            &get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0"),
        )?;

        Ok(Self {
            host,
            port,
            public_dir,
            catalog_path,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration serving `public_dir` with defaults for everything else.
    #[must_use]
    pub fn for_public_dir(public_dir: impl Into<PathBuf>) -> Self {
        let public_dir = public_dir.into();
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            catalog_path: public_dir.join(CATALOG_FILE_NAME),
            public_dir,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse a variable's value, naming the variable in the error.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_port() {
        let port: u16 = parse_var("PORT", "8080").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_var_trims_whitespace() {
        let port: u16 = parse_var("PORT", " 3000\n").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_var_invalid_port() {
        let err = parse_var::<u16>("PORT", "not-a-port").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "PORT"));
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_parse_var_out_of_range_port() {
        assert!(parse_var::<u16>("PORT", "70000").is_err());
    }

    #[test]
    fn test_parse_var_host() {
        let host: IpAddr = parse_var("STOREFRONT_HOST", "0.0.0.0").unwrap();
        assert!(host.is_unspecified());
    }

    #[test]
    fn test_for_public_dir_defaults() {
        let config = StorefrontConfig::for_public_dir("/srv/web");
        assert_eq!(config.port, 3000);
        assert_eq!(config.catalog_path, PathBuf::from("/srv/web/catalog.json"));
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:3000");
    }
}
