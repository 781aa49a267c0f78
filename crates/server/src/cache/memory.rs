//! In-process cache backed by `moka`.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Cache, CacheError};

/// Bounded in-memory cache of JSON-encoded values.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    entries: MokaCache<String, Vec<u8>>,
}

impl MemoryCache {
    /// Default entry lifetime, matching the Redis backend.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

    /// Default maximum number of entries.
    pub const DEFAULT_CAPACITY: u64 = 10_000;

    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY, ttl)
    }

    #[must_use]
    pub fn with_capacity(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            entries: MokaCache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl Cache for MemoryCache {
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let Some(bytes) = self.entries.get(key).await else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn write<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.entries.insert(key.to_owned(), bytes).await;
        Ok(())
    }
}
