//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required (when `QUARRY_STORE=postgres`)
//! - `QUARRY_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `QUARRY_STORE` - `postgres` (default) or `memory`
//! - `QUARRY_HOST` - Bind address (default: 127.0.0.1)
//! - `GQL_PORT` - Listen port (default: 4000)
//! - `QUARRY_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `QUARRY_CACHE_CAPACITY` - Maximum cached entries (default: 10000)
//! - `QUARRY_CACHE_TTL_SECS` - Default cache entry lifetime (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `QUARRY_LOG_FORMAT` - `json` for structured log output (read by the binary at start-up)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which document store backs the collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// JSONB documents in `PostgreSQL`.
    Postgres,
    /// Process-local collections; data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}'")),
        }
    }
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Store backend
    pub store: StoreBackend,
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Server-side cache settings
    pub cache: CacheConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// Server-side key-value cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub capacity: u64,
    /// Lifetime of entries stored without an explicit TTL
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            ttl: Duration::from_secs(300),
        }
    }
}

impl Default for ApiConfig {
    /// In-memory store on 127.0.0.1:4000 with no error tracking.
    fn default() -> Self {
        Self {
            store: StoreBackend::Memory,
            database_url: None,
            db_max_connections: 10,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 4000,
            cache: CacheConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ApiConfig {
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store = parse_or_default(&get, "QUARRY_STORE", StoreBackend::Postgres)?;

        let database_url = get("QUARRY_DATABASE_URL")
            .or_else(|| get("DATABASE_URL"))
            .map(SecretString::from);
        if store == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::MissingEnvVar("QUARRY_DATABASE_URL".to_string()));
        }

        let defaults = Self::default();

        Ok(Self {
            store,
            database_url,
            db_max_connections: parse_or_default(
                &get,
                "QUARRY_DB_MAX_CONNECTIONS",
                defaults.db_max_connections,
            )?,
            host: parse_or_default(&get, "QUARRY_HOST", defaults.host)?,
            port: parse_or_default(&get, "GQL_PORT", defaults.port)?,
            cache: CacheConfig {
                capacity: parse_or_default(&get, "QUARRY_CACHE_CAPACITY", defaults.cache.capacity)?,
                ttl: Duration::from_secs(parse_or_default(
                    &get,
                    "QUARRY_CACHE_TTL_SECS",
                    defaults.cache.ttl.as_secs(),
                )?),
            },
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get the database URL with fallback to generic `DATABASE_URL`.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` if neither variable is set.
pub fn database_url_from_env() -> Result<SecretString, ConfigError> {
    let _ = dotenvy::dotenv();

    std::env::var("QUARRY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar("QUARRY_DATABASE_URL".to_string()))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "QUARRY_DATABASE_URL"));
    }

    #[test]
    fn test_database_url_fallback() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/quarry")]).unwrap();
        assert_eq!(config.store, StoreBackend::Postgres);
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://localhost/quarry"
        );
    }

    #[test]
    fn test_memory_store_defaults() {
        let config = load(&[("QUARRY_STORE", "memory")]).unwrap();
        assert_eq!(config.store, StoreBackend::Memory);
        assert!(config.database_url.is_none());
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:4000");
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("QUARRY_STORE", "Memory"),
            ("QUARRY_HOST", "0.0.0.0"),
            ("GQL_PORT", "8080"),
            ("QUARRY_CACHE_CAPACITY", "50"),
            ("QUARRY_CACHE_TTL_SECS", "5"),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.cache.capacity, 50);
        assert_eq!(config.cache.ttl, Duration::from_secs(5));
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("QUARRY_STORE", "memory"), ("GQL_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "GQL_PORT"));

        let err = load(&[("QUARRY_STORE", "mongo")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "QUARRY_STORE"));
    }
}
