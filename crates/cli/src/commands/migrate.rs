//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! shopapi-cli migrate up
//!
//! # List migrations and whether each is applied
//! shopapi-cli migrate status
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPAPI_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! # Migration Files
//!
//! Migrations live in `crates/server/migrations/` and are embedded in the
//! server crate as `shopapi_server::db::MIGRATOR`.

use std::collections::HashSet;

use secrecy::SecretString;
use shopapi_server::db::{MIGRATOR, create_pool};
use sqlx::migrate::Migrate;

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

fn database_url() -> Result<SecretString, MigrationError> {
    dotenvy::dotenv().ok();

    std::env::var("SHOPAPI_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MigrationError::MissingEnvVar("SHOPAPI_DATABASE_URL"))
}

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn up() -> Result<(), MigrationError> {
    let database_url = database_url()?;

    tracing::info!("Connecting to shop database...");
    let pool = create_pool(&database_url).await?;

    tracing::info!("Running shop migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Shop migrations complete!");
    pool.close().await;
    Ok(())
}

/// Report which embedded migrations have been applied.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the migrations table
/// cannot be read.
pub async fn status() -> Result<(), MigrationError> {
    let database_url = database_url()?;
    let pool = create_pool(&database_url).await?;

    let mut conn = pool.acquire().await?;
    conn.ensure_migrations_table().await?;
    let applied: HashSet<i64> = conn
        .list_applied_migrations()
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();
    drop(conn);

    let mut pending = 0_usize;
    for migration in MIGRATOR.iter() {
        let is_applied = applied.contains(&migration.version);
        if !is_applied {
            pending += 1;
        }
        tracing::info!(
            version = migration.version,
            description = %migration.description,
            applied = is_applied,
            "migration"
        );
    }

    tracing::info!(pending, "Migration status checked");
    pool.close().await;
    Ok(())
}
