//! Supplier storage.

use shopapi_core::{
    AddSupplierRequest, AddSupplierResponse, Address, DeleteSupplierRequest,
    DeleteSupplierResponse, GetSupplierRequest, GetSupplierResponse, GetSuppliersRequest,
    GetSuppliersResponse, PhoneNumber, Status, Supplier, SupplierUid,
    UpdateSupplierAddressRequest, UpdateSupplierAddressResponse,
};
use sqlx::PgConnection;

use super::{PgStorage, RepositoryError, address, limit_of, tx};
use crate::service::SupplierStorage;

const SELECT_SUPPLIER: &str = r"
    SELECT s.uid, s.name, s.phone_number, a.country, a.city, a.street
    FROM shop.supplier s
    JOIN shop.address a ON a.id = s.address_id
";

#[derive(Debug, sqlx::FromRow)]
struct SupplierRow {
    uid: SupplierUid,
    name: String,
    phone_number: PhoneNumber,
    country: String,
    city: String,
    street: String,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Self {
            uid: row.uid,
            name: row.name,
            phone_number: row.phone_number,
            address: Address {
                country: row.country,
                city: row.city,
                street: row.street,
            },
        }
    }
}

impl SupplierStorage for PgStorage {
    async fn add_supplier(
        &self,
        req: &AddSupplierRequest,
    ) -> Result<AddSupplierResponse, RepositoryError> {
        self.bounded(async {
            let mut tx = tx::begin(&self.pool).await?;
            let result = insert_supplier(&mut tx, &req.supplier).await;
            tx::finish(tx, result).await
        })
        .await
    }

    async fn update_supplier_address(
        &self,
        req: &UpdateSupplierAddressRequest,
    ) -> Result<UpdateSupplierAddressResponse, RepositoryError> {
        self.bounded(async {
            let mut tx = tx::begin(&self.pool).await?;
            let result = repoint_supplier_address(&mut tx, req.uid, &req.address).await;
            tx::finish(tx, result).await
        })
        .await
    }

    async fn delete_supplier(
        &self,
        req: &DeleteSupplierRequest,
    ) -> Result<DeleteSupplierResponse, RepositoryError> {
        self.bounded(async {
            let mut tx = tx::begin(&self.pool).await?;
            let result = remove_supplier(&mut tx, req.uid).await;
            tx::finish(tx, result).await
        })
        .await
    }

    async fn get_suppliers(
        &self,
        req: &GetSuppliersRequest,
    ) -> Result<GetSuppliersResponse, RepositoryError> {
        let page = req.page();
        self.bounded(async {
            let rows: Vec<SupplierRow> =
                sqlx::query_as(&format!("{SELECT_SUPPLIER} ORDER BY s.uid LIMIT $1 OFFSET $2"))
                    .bind(limit_of(page))
                    .bind(i64::from(page.offset))
                    .fetch_all(&self.pool)
                    .await?;

            Ok(GetSuppliersResponse {
                cached: false,
                suppliers: rows.into_iter().map(Supplier::from).collect(),
            })
        })
        .await
    }

    async fn get_supplier(
        &self,
        req: &GetSupplierRequest,
    ) -> Result<GetSupplierResponse, RepositoryError> {
        self.bounded(async {
            let row: Option<SupplierRow> =
                sqlx::query_as(&format!("{SELECT_SUPPLIER} WHERE s.uid = $1"))
                    .bind(req.uid)
                    .fetch_optional(&self.pool)
                    .await?;

            Ok(row.map_or_else(
                || GetSupplierResponse::with_status(Status::NotFound),
                |row| GetSupplierResponse::found(row.into()),
            ))
        })
        .await
    }
}

// =============================================================================
// Transaction bodies
// =============================================================================

async fn insert_supplier(
    conn: &mut PgConnection,
    supplier: &Supplier,
) -> Result<AddSupplierResponse, RepositoryError> {
    let address_id = address::insert(conn, &supplier.address).await?;

    let inserted: Option<SupplierUid> = sqlx::query_scalar(
        r"
        INSERT INTO shop.supplier (uid, name, phone_number, address_id)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (uid) DO NOTHING
        RETURNING uid
        ",
    )
    .bind(supplier.uid.or_generate())
    .bind(&supplier.name)
    .bind(&supplier.phone_number)
    .bind(address_id)
    .fetch_optional(&mut *conn)
    .await?;

    match inserted {
        Some(uid) => Ok(AddSupplierResponse::created(uid)),
        None => {
            address::collect(conn, address_id).await?;
            Ok(AddSupplierResponse::with_status(Status::AlreadyExists))
        }
    }
}

async fn repoint_supplier_address(
    conn: &mut PgConnection,
    uid: SupplierUid,
    new_address: &Address,
) -> Result<UpdateSupplierAddressResponse, RepositoryError> {
    let new_id = address::insert(conn, new_address).await?;

    // Self-join exposes the pre-update address id
    let previous: Option<i32> = sqlx::query_scalar(
        r"
        UPDATE shop.supplier s
        SET address_id = $2
        FROM shop.supplier old
        WHERE s.uid = old.uid AND s.uid = $1
        RETURNING old.address_id
        ",
    )
    .bind(uid)
    .bind(new_id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(previous) = previous else {
        address::collect(conn, new_id).await?;
        return Ok(UpdateSupplierAddressResponse::with_status(Status::NotFound));
    };

    address::collect(conn, previous).await?;
    Ok(UpdateSupplierAddressResponse::with_status(Status::Success))
}

async fn remove_supplier(
    conn: &mut PgConnection,
    uid: SupplierUid,
) -> Result<DeleteSupplierResponse, RepositoryError> {
    let address_id: Option<i32> =
        sqlx::query_scalar("DELETE FROM shop.supplier WHERE uid = $1 RETURNING address_id")
            .bind(uid)
            .fetch_optional(&mut *conn)
            .await?;

    let Some(address_id) = address_id else {
        return Ok(DeleteSupplierResponse::with_status(Status::NotFound));
    };

    address::collect(conn, address_id).await?;
    Ok(DeleteSupplierResponse::with_status(Status::Success))
}
