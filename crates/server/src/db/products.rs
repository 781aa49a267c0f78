//! Product storage.
//!
//! Prices are stored as `BIGINT` minor units (hundredths).

use chrono::NaiveDate;
use shopapi_core::{
    AddProductRequest, AddProductResponse, DateOnly, DecreaseProductsRequest,
    DecreaseProductsResponse, DeleteProductRequest, DeleteProductResponse, GetProductRequest,
    GetProductResponse, GetProductsRequest, GetProductsResponse, ImageUid, Price, Product,
    ProductUid, Status, SupplierUid,
};
use sqlx::PgConnection;

use super::{PgStorage, RepositoryError, limit_of, tx};
use crate::service::ProductStorage;

const SELECT_PRODUCT: &str = r"
    SELECT uid, name, category, price, available_stock, last_update_date,
           supplier_id, image_id
    FROM shop.product
";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    uid: ProductUid,
    name: String,
    category: String,
    price: i64,
    available_stock: i64,
    last_update_date: NaiveDate,
    supplier_id: SupplierUid,
    image_id: ImageUid,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            uid: row.uid,
            name: row.name,
            category: row.category,
            price: Price::from_minor_units(row.price),
            available_stock: row.available_stock,
            last_update_date: Some(row.last_update_date.into()),
            supplier_uid: row.supplier_id,
            image_uid: row.image_id,
        }
    }
}

impl ProductStorage for PgStorage {
    async fn add_product(
        &self,
        req: &AddProductRequest,
    ) -> Result<AddProductResponse, RepositoryError> {
        // Conversion failures are errors, not statuses
        let price = req.product.price.to_minor_units()?;
        self.bounded(async {
            let mut tx = tx::begin(&self.pool).await?;
            let result = insert_product(&mut tx, &req.product, price).await;
            tx::finish(tx, result).await
        })
        .await
    }

    async fn decrease_products(
        &self,
        req: &DecreaseProductsRequest,
    ) -> Result<DecreaseProductsResponse, RepositoryError> {
        self.bounded(async {
            let mut tx = tx::begin_locking(&self.pool).await?;
            let result = decrease_stock(&mut tx, req.uid, i64::from(req.amount)).await;
            tx::finish(tx, result).await
        })
        .await
    }

    async fn get_product(
        &self,
        req: &GetProductRequest,
    ) -> Result<GetProductResponse, RepositoryError> {
        self.bounded(async {
            let row: Option<ProductRow> =
                sqlx::query_as(&format!("{SELECT_PRODUCT} WHERE uid = $1"))
                    .bind(req.uid)
                    .fetch_optional(&self.pool)
                    .await?;

            Ok(row.map_or_else(
                || GetProductResponse::with_status(Status::NotFound),
                |row| GetProductResponse::found(row.into()),
            ))
        })
        .await
    }

    async fn get_products(
        &self,
        req: &GetProductsRequest,
    ) -> Result<GetProductsResponse, RepositoryError> {
        let page = req.page();
        self.bounded(async {
            let rows: Vec<ProductRow> =
                sqlx::query_as(&format!("{SELECT_PRODUCT} ORDER BY uid LIMIT $1 OFFSET $2"))
                    .bind(limit_of(page))
                    .bind(i64::from(page.offset))
                    .fetch_all(&self.pool)
                    .await?;

            Ok(GetProductsResponse {
                cached: false,
                products: rows.into_iter().map(Product::from).collect(),
            })
        })
        .await
    }

    async fn delete_product(
        &self,
        req: &DeleteProductRequest,
    ) -> Result<DeleteProductResponse, RepositoryError> {
        self.bounded(async {
            let deleted: Option<ProductUid> =
                sqlx::query_scalar("DELETE FROM shop.product WHERE uid = $1 RETURNING uid")
                    .bind(req.uid)
                    .fetch_optional(&self.pool)
                    .await?;

            Ok(DeleteProductResponse::with_status(if deleted.is_some() {
                Status::Success
            } else {
                Status::NotFound
            }))
        })
        .await
    }
}

// =============================================================================
// Transaction bodies
// =============================================================================

async fn insert_product(
    conn: &mut PgConnection,
    product: &Product,
    price: i64,
) -> Result<AddProductResponse, RepositoryError> {
    let references_exist: bool = sqlx::query_scalar(
        r"
        SELECT EXISTS (SELECT 1 FROM shop.supplier WHERE uid = $1)
           AND EXISTS (SELECT 1 FROM shop.image WHERE uid = $2)
        ",
    )
    .bind(product.supplier_uid)
    .bind(product.image_uid)
    .fetch_one(&mut *conn)
    .await?;

    if !references_exist {
        return Ok(AddProductResponse::with_status(Status::MissingImageOrSupplier));
    }

    let last_update = product.last_update_date.unwrap_or_else(DateOnly::today);

    let inserted: Option<ProductUid> = sqlx::query_scalar(
        r"
        INSERT INTO shop.product
            (uid, name, category, price, available_stock, last_update_date, supplier_id, image_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (uid) DO NOTHING
        RETURNING uid
        ",
    )
    .bind(product.uid.or_generate())
    .bind(&product.name)
    .bind(&product.category)
    .bind(price)
    .bind(product.available_stock)
    .bind(last_update.as_naive())
    .bind(product.supplier_uid)
    .bind(product.image_uid)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(inserted.map_or_else(
        || AddProductResponse::with_status(Status::AlreadyExists),
        AddProductResponse::created,
    ))
}

async fn decrease_stock(
    conn: &mut PgConnection,
    uid: ProductUid,
    amount: i64,
) -> Result<DecreaseProductsResponse, RepositoryError> {
    let stock: Option<i64> = sqlx::query_scalar(
        "SELECT available_stock FROM shop.product WHERE uid = $1 FOR UPDATE",
    )
    .bind(uid)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(stock) = stock else {
        return Ok(DecreaseProductsResponse::not_found());
    };

    if stock < amount {
        return Ok(DecreaseProductsResponse::not_enough(stock));
    }

    let left: i64 = sqlx::query_scalar(
        r"
        UPDATE shop.product
        SET available_stock = available_stock - $2,
            last_update_date = CURRENT_DATE
        WHERE uid = $1
        RETURNING available_stock
        ",
    )
    .bind(uid)
    .bind(amount)
    .fetch_one(&mut *conn)
    .await?;

    Ok(DecreaseProductsResponse::left(left))
}
