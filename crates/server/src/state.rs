//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::AnyCache;
use crate::config::ServerConfig;
use crate::db::PgStorage;
use crate::service::Service;
use crate::upload::UploadPolicy;

/// The service wired to the production backends.
pub type ShopService = Service<AnyCache, PgStorage>;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    service: ShopService,
    upload: UploadPolicy,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Storage calls are bounded by `config.storage_timeout`.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool, cache: AnyCache) -> Self {
        let storage = PgStorage::new(pool, config.storage_timeout);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                service: Service::new(cache, storage),
                upload: UploadPolicy::default(),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the service orchestrator.
    #[must_use]
    pub fn service(&self) -> &ShopService {
        &self.inner.service
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        self.inner.service.storage().pool()
    }

    /// Get the image upload whitelist.
    #[must_use]
    pub fn upload(&self) -> &UploadPolicy {
        &self.inner.upload
    }
}
