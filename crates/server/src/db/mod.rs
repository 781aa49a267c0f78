//! `PostgreSQL` storage backend.
//!
//! # Schema: `shop`
//!
//! ## Tables
//!
//! - `address` - Postal addresses, shared by clients and suppliers
//! - `client` - Registered clients, each pointing at one address
//! - `supplier` - Suppliers, each pointing at one address
//! - `image` - Raw image bytes
//! - `product` - Products, referencing a supplier and an image
//!
//! An address row lives exactly as long as something references it. Every
//! operation that drops or repoints a reference recounts both referencing
//! tables in the same transaction and deletes the row when both are zero.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p shopapi-cli -- migrate up
//! ```

mod address;
pub mod clients;
pub mod images;
pub mod products;
pub mod suppliers;
mod tx;

use std::future::Future;
use std::time::Duration;

use secrecy::ExposeSecret;
use shopapi_core::PriceError;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
///
/// Only infrastructure failures are errors. Domain outcomes such as a
/// missing row travel in the response status.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The storage call did not finish before its deadline.
    #[error("storage call exceeded {0:?}")]
    Timeout(Duration),

    /// A price cannot be stored as minor units.
    #[error("price out of range: {0}")]
    PriceOutOfRange(#[from] PriceError),

    /// The transaction failed and so did its rollback.
    #[error("transaction error: {source}; rollback error: {rollback}")]
    Rollback {
        source: Box<RepositoryError>,
        rollback: sqlx::Error,
    },
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Storage backend implementing every storage trait over one pool.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
    timeout: Duration,
}

impl PgStorage {
    /// Default per-call deadline.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    #[must_use]
    pub const fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run a storage call under the configured deadline.
    ///
    /// An expired call drops its future; an open transaction inside it is
    /// rolled back when its connection returns to the pool.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, RepositoryError>>,
    ) -> Result<T, RepositoryError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| RepositoryError::Timeout(self.timeout))?
    }
}

/// `LIMIT` bind value: `NULL` (no limit) for an unbounded page.
fn limit_of(page: shopapi_core::Page) -> Option<i64> {
    (!page.is_unbounded()).then_some(i64::from(page.limit))
}
