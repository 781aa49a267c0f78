//! Redis cache backend.

use std::future::Future;
use std::time::Duration;

use redis::aio::ConnectionManager;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Cache, CacheError};

/// Redis-backed cache. Every call is bounded by `timeout`.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    timeout: Duration,
    ttl: Duration,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("timeout", &self.timeout)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Default per-call deadline.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

    /// Default entry lifetime.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

    /// Connect and verify the server answers `PING`.
    ///
    /// The manager's initial connection attempts and the `PING` each get
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Redis` if the URL is invalid or the server
    /// refuses, `CacheError::Timeout` if it does not answer in time.
    pub async fn connect(
        url: &SecretString,
        timeout: Duration,
        ttl: Duration,
    ) -> Result<Self, CacheError> {
        let client = redis::Client::open(url.expose_secret())?;
        let conn = within(timeout, ConnectionManager::new(client)).await?;
        let cache = Self { conn, timeout, ttl };

        let mut conn = cache.conn.clone();
        let _: String = cache
            .bounded(redis::cmd("PING").query_async(&mut conn))
            .await?;

        Ok(cache)
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = redis::RedisResult<T>>,
    ) -> Result<T, CacheError> {
        within(self.timeout, call).await
    }
}

async fn within<T>(
    timeout: Duration,
    call: impl Future<Output = redis::RedisResult<T>>,
) -> Result<T, CacheError> {
    tokio::time::timeout(timeout, call)
        .await
        .map_err(|_| CacheError::Timeout(timeout))?
        .map_err(CacheError::from)
}

impl Cache for RedisCache {
    async fn read<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let mut conn = self.conn.clone();
        let bytes: Option<Vec<u8>> = self
            .bounded(redis::cmd("GET").arg(key).query_async(&mut conn))
            .await?;

        bytes
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(CacheError::from)
    }

    async fn write<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        let mut conn = self.conn.clone();
        let () = self
            .bounded(
                redis::cmd("SET")
                    .arg(key)
                    .arg(bytes)
                    .arg("EX")
                    .arg(self.ttl.as_secs().max(1))
                    .query_async(&mut conn),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shopapi_core::GetClientsResponse;

    async fn connect() -> RedisCache {
        let url = std::env::var("TEST_REDIS_URL").expect("TEST_REDIS_URL must be set");
        RedisCache::connect(
            &SecretString::from(url),
            RedisCache::DEFAULT_TIMEOUT,
            Duration::from_secs(5),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    #[ignore = "Requires Redis (TEST_REDIS_URL)"]
    async fn test_roundtrip() {
        let cache = connect().await;
        let key = format!("test:{}", uuid::Uuid::new_v4());

        let missing: Option<GetClientsResponse> = cache.read(&key).await.unwrap();
        assert!(missing.is_none());

        let value = GetClientsResponse::default();
        cache.write(&key, &value).await.unwrap();
        let hit: Option<GetClientsResponse> = cache.read(&key).await.unwrap();
        assert_eq!(hit, Some(value));
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_fast() {
        let started = std::time::Instant::now();
        let result = RedisCache::connect(
            &SecretString::from("redis://127.0.0.1:1/".to_string()),
            Duration::from_millis(100),
            Duration::from_secs(5),
        )
        .await;

        assert!(result.is_err());
        assert!(
            started.elapsed() < Duration::from_secs(2),
            "connect took {:?}",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn test_within_maps_expiry_to_timeout() {
        let pending = std::future::pending::<redis::RedisResult<()>>();
        let err = within(Duration::from_millis(10), pending).await.unwrap_err();
        assert!(matches!(err, CacheError::Timeout(d) if d == Duration::from_millis(10)));
    }
}
