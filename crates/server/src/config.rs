//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPAPI_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `SHOPAPI_REDIS_URL` - Redis connection string, only when `SHOPAPI_CACHE=redis`
//!
//! ## Optional
//! - `SHOPAPI_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPAPI_PORT` - Listen port (default: 8080)
//! - `SHOPAPI_CACHE` - Cache backend, `memory` or `redis` (default: memory)
//! - `SHOPAPI_STORAGE_TIMEOUT_MS` - Deadline for each storage call (default: 5000)
//! - `SHOPAPI_CACHE_TIMEOUT_MS` - Deadline for each Redis call (default: 200)
//! - `SHOPAPI_CACHE_TTL_SECS` - Cache entry lifetime (default: 600)
//! - `SHOPAPI_LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
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

/// Which cache backend the service reads through.
#[derive(Clone)]
pub enum CacheBackend {
    /// In-process cache.
    Memory,
    /// Shared Redis instance.
    Redis { url: SecretString },
}

impl std::fmt::Debug for CacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => f.write_str("Memory"),
            Self::Redis { .. } => f.debug_struct("Redis").field("url", &"[REDACTED]").finish(),
        }
    }
}

/// Cache settings.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub backend: CacheBackend,
    /// Per-call deadline for remote backends
    pub timeout: Duration,
    /// Entry lifetime
    pub ttl: Duration,
}

/// Application configuration.
///
/// Implements `Debug` manually to redact the database URL.
#[derive(Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Deadline applied to every storage call
    pub storage_timeout: Duration,
    pub cache: CacheConfig,
    /// Emit JSON log lines instead of text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("database_url", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("storage_timeout", &self.storage_timeout)
            .field("cache", &self.cache)
            .field("json_logs", &self.json_logs)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl ServerConfig {
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
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(&lookup);

        let database_url = env.database_url("SHOPAPI_DATABASE_URL")?;
        let host = env.parsed::<IpAddr>("SHOPAPI_HOST", "127.0.0.1")?;
        let port = env.parsed::<u16>("SHOPAPI_PORT", "8080")?;
        let storage_timeout =
            Duration::from_millis(env.parsed("SHOPAPI_STORAGE_TIMEOUT_MS", "5000")?);

        let backend = match env.or_default("SHOPAPI_CACHE", "memory").as_str() {
            "memory" => CacheBackend::Memory,
            "redis" => CacheBackend::Redis {
                url: SecretString::from(env.required("SHOPAPI_REDIS_URL")?),
            },
            other => {
                return Err(ConfigError::InvalidEnvVar(
                    "SHOPAPI_CACHE".to_string(),
                    format!("expected 'memory' or 'redis', got '{other}'"),
                ));
            }
        };
        let cache = CacheConfig {
            backend,
            timeout: Duration::from_millis(env.parsed("SHOPAPI_CACHE_TIMEOUT_MS", "200")?),
            ttl: Duration::from_secs(env.parsed("SHOPAPI_CACHE_TTL_SECS", "600")?),
        };

        let json_logs = env.optional("SHOPAPI_LOG_FORMAT").as_deref() == Some("json");

        Ok(Self {
            database_url,
            host,
            port,
            storage_timeout,
            cache,
            json_logs,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
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

struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get a required environment variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional environment variable.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    /// Get an environment variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse an environment variable, falling back to a default.
    fn parsed<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.or_default(key, default)
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    /// Get database URL with fallback to generic `DATABASE_URL`.
    fn database_url(&self, primary_key: &str) -> Result<SecretString, ConfigError> {
        self.optional(primary_key)
            .or_else(|| self.optional("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
    }
}
