//! Shared address rows and their reference-count collection.

use shopapi_core::Address;
use sqlx::PgConnection;

use super::RepositoryError;

/// Insert an address and return its id.
pub(super) async fn insert(
    conn: &mut PgConnection,
    address: &Address,
) -> Result<i32, RepositoryError> {
    let id = sqlx::query_scalar(
        r"
        INSERT INTO shop.address (country, city, street)
        VALUES ($1, $2, $3)
        RETURNING id
        ",
    )
    .bind(&address.country)
    .bind(&address.city)
    .bind(&address.street)
    .fetch_one(&mut *conn)
    .await?;

    Ok(id)
}

/// Delete the address if no client and no supplier references it.
///
/// Returns whether the row was deleted.
pub(super) async fn collect(conn: &mut PgConnection, id: i32) -> Result<bool, RepositoryError> {
    let (clients, suppliers): (i64, i64) = sqlx::query_as(
        r"
        SELECT
            (SELECT COUNT(*) FROM shop.client WHERE address_id = $1),
            (SELECT COUNT(*) FROM shop.supplier WHERE address_id = $1)
        ",
    )
    .bind(id)
    .fetch_one(&mut *conn)
    .await?;

    if clients > 0 || suppliers > 0 {
        return Ok(false);
    }

    let deleted = sqlx::query("DELETE FROM shop.address WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(deleted.rows_affected() > 0)
}
