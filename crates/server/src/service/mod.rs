//! Service orchestrator.
//!
//! Sits between the transport and storage. Every cacheable call goes through
//! [`Service::exec_with_cache`]; stock decrements always reach storage.
//!
//! Service methods return `Option<Response>`. `None` means storage failed;
//! the failure has already been logged with the operation name and the
//! transport answers `service failed exec request`.

mod clients;
mod images;
mod products;
pub mod storage;
mod suppliers;

#[cfg(test)]
pub(crate) mod fakes;

use std::future::Future;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shopapi_core::{CacheFlag, HasStatus};
use tracing::{error, info, warn};

use crate::cache::{Cache, cache_key, content_hash};
use crate::db::RepositoryError;

pub use storage::{ClientStorage, ImageStorage, ProductStorage, Storage, SupplierStorage};

/// Orchestrates cache and storage for every operation.
#[derive(Debug, Clone)]
pub struct Service<C, S> {
    cache: C,
    storage: S,
}

impl<C: Cache, S: Storage> Service<C, S> {
    #[must_use]
    pub const fn new(cache: C, storage: S) -> Self {
        Self { cache, storage }
    }

    /// Get a reference to the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Read-through execution.
    ///
    /// Unless `avoid_cache` is set, a cache hit is returned with
    /// `cached = true` and `fetch` is never called. Otherwise `fetch` runs;
    /// its error propagates and nothing is cached. A successful result is
    /// written back and returned with `cached = false`. Cache failures are
    /// logged and treated as misses.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `fetch`.
    pub async fn exec_with_cache<T, F, Fut>(
        &self,
        key: &str,
        avoid_cache: bool,
        fetch: F,
    ) -> Result<T, RepositoryError>
    where
        T: CacheFlag + Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, RepositoryError>> + Send,
    {
        if !avoid_cache {
            match self.cache.read::<T>(key).await {
                Ok(Some(mut value)) => {
                    value.set_cached(true);
                    return Ok(value);
                }
                Ok(None) => {}
                Err(e) => warn!(key, error = %e, "Cache read failed, falling back to storage"),
            }
        }

        let mut value = fetch().await?;

        if let Err(e) = self.cache.write(key, &value).await {
            warn!(key, error = %e, "Cache write failed");
        }

        value.set_cached(false);
        Ok(value)
    }

    /// Log the outcome of an operation and collapse errors into `None`.
    fn conclude<T: HasStatus>(
        operation: &'static str,
        result: Result<T, RepositoryError>,
    ) -> Option<T> {
        match result {
            Ok(resp) => {
                if let Some(status) = resp.status() {
                    info!(operation, status = %status, "{operation} status");
                }
                Some(resp)
            }
            Err(e) => {
                error!(operation, error = %e, "Failed on {operation}");
                None
            }
        }
    }
}

/// Key for a payload-carrying operation.
///
/// Returns the key and the effective `avoid_cache` flag: when the payload
/// cannot be encoded the call bypasses the cache.
fn payload_key<P: Serialize + ?Sized>(
    operation: &str,
    prefix: &[&str],
    payload: &P,
    avoid_cache: bool,
) -> (String, bool) {
    match content_hash(payload) {
        Ok(hash) => {
            let mut parts = prefix.to_vec();
            parts.push(&hash);
            (cache_key(operation, &parts), avoid_cache)
        }
        Err(e) => {
            error!(operation, error = %e, "Failed hashing payload, bypassing cache");
            (cache_key(operation, prefix), true)
        }
    }
}
