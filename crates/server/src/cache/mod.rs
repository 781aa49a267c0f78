//! Read-through cache port.
//!
//! Provides both in-memory and Redis cache backends behind one [`Cache`]
//! trait. Values are stored as JSON in both.

pub mod key;
pub mod memory;
pub mod redis;

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use key::{bytes_hash, cache_key, content_hash};
pub use memory::MemoryCache;
pub use redis::RedisCache;

use crate::config::{CacheBackend, CacheConfig};

/// Cache failures. Callers treat every variant as a miss.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("cache call exceeded {0:?}")]
    Timeout(std::time::Duration),
}

/// Key/value cache holding serialized responses.
pub trait Cache: Send + Sync {
    /// Look up a key. `Ok(None)` is a miss.
    fn read<T: DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<T>, CacheError>> + Send;

    /// Store a value under a key with the backend's expiration.
    fn write<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> impl Future<Output = Result<(), CacheError>> + Send;
}

/// The backend selected at startup.
#[derive(Debug, Clone)]
pub enum AnyCache {
    Memory(MemoryCache),
    Redis(RedisCache),
}

impl AnyCache {
    /// Build the configured backend. Redis is pinged before returning.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the Redis server cannot be reached.
    pub async fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        match &config.backend {
            CacheBackend::Memory => Ok(MemoryCache::new(config.ttl).into()),
            CacheBackend::Redis { url } => {
                let cache = RedisCache::connect(url, config.timeout, config.ttl).await?;
                Ok(cache.into())
            }
        }
    }
}

impl Cache for AnyCache {
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self {
            Self::Memory(cache) => cache.read(key).await,
            Self::Redis(cache) => cache.read(key).await,
        }
    }

    async fn write<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        match self {
            Self::Memory(cache) => cache.write(key, value).await,
            Self::Redis(cache) => cache.write(key, value).await,
        }
    }
}

impl From<MemoryCache> for AnyCache {
    fn from(cache: MemoryCache) -> Self {
        Self::Memory(cache)
    }
}

impl From<RedisCache> for AnyCache {
    fn from(cache: RedisCache) -> Self {
        Self::Redis(cache)
    }
}
