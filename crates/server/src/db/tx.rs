//! Transaction helpers.

use sqlx::{PgPool, Postgres, Transaction};

use super::RepositoryError;

/// Open a transaction at `REPEATABLE READ`.
pub(super) async fn begin(pool: &PgPool) -> Result<Transaction<'static, Postgres>, RepositoryError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

/// Open a transaction at the default `READ COMMITTED`.
///
/// For bodies that serialize on `SELECT ... FOR UPDATE`: waiters re-read the
/// committed row instead of failing with a serialization error.
pub(super) async fn begin_locking(
    pool: &PgPool,
) -> Result<Transaction<'static, Postgres>, RepositoryError> {
    Ok(pool.begin().await?)
}

/// Commit on success, roll back on failure.
///
/// A failed rollback is chained onto the original error.
pub(super) async fn finish<T>(
    tx: Transaction<'static, Postgres>,
    result: Result<T, RepositoryError>,
) -> Result<T, RepositoryError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => match tx.rollback().await {
            Ok(()) => Err(err),
            Err(rollback) => Err(RepositoryError::Rollback {
                source: Box::new(err),
                rollback,
            }),
        },
    }
}
