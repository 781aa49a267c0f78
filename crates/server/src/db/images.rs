//! Image storage.
//!
//! Single-statement operations; they run on the pool without an explicit
//! transaction.

use shopapi_core::{
    AddImageRequest, AddImageResponse, DeleteImageRequest, DeleteImageResponse, GetImageRequest,
    GetImageResponse, GetProductImageRequest, GetProductImageResponse, ImageUid, Status,
    UpdateImageRequest, UpdateImageResponse,
};

use super::{PgStorage, RepositoryError};
use crate::service::ImageStorage;

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    uid: ImageUid,
    image: Vec<u8>,
}

impl ImageStorage for PgStorage {
    async fn add_image(&self, req: &AddImageRequest) -> Result<AddImageResponse, RepositoryError> {
        self.bounded(async {
            let inserted: Option<ImageUid> = sqlx::query_scalar(
                r"
                INSERT INTO shop.image (uid, image)
                VALUES ($1, $2)
                ON CONFLICT (uid) DO NOTHING
                RETURNING uid
                ",
            )
            .bind(req.uid.or_generate())
            .bind(&req.image)
            .fetch_optional(&self.pool)
            .await?;

            Ok(inserted.map_or_else(
                || AddImageResponse::with_status(Status::AlreadyExists),
                AddImageResponse::created,
            ))
        })
        .await
    }

    async fn update_image(
        &self,
        req: &UpdateImageRequest,
    ) -> Result<UpdateImageResponse, RepositoryError> {
        self.bounded(async {
            let updated = sqlx::query("UPDATE shop.image SET image = $2 WHERE uid = $1")
                .bind(req.uid)
                .bind(&req.image)
                .execute(&self.pool)
                .await?;

            Ok(UpdateImageResponse::with_status(if updated.rows_affected() > 0 {
                Status::Success
            } else {
                Status::NotFound
            }))
        })
        .await
    }

    async fn delete_image(
        &self,
        req: &DeleteImageRequest,
    ) -> Result<DeleteImageResponse, RepositoryError> {
        self.bounded(async {
            let deleted = sqlx::query("DELETE FROM shop.image WHERE uid = $1")
                .bind(req.uid)
                .execute(&self.pool)
                .await?;

            Ok(DeleteImageResponse::with_status(if deleted.rows_affected() > 0 {
                Status::Success
            } else {
                Status::NotFound
            }))
        })
        .await
    }

    async fn get_product_image(
        &self,
        req: &GetProductImageRequest,
    ) -> Result<GetProductImageResponse, RepositoryError> {
        self.bounded(async {
            let row: Option<ImageRow> = sqlx::query_as(
                r"
                SELECT i.uid, i.image
                FROM shop.product p
                JOIN shop.image i ON i.uid = p.image_id
                WHERE p.uid = $1
                ",
            )
            .bind(req.product_uid)
            .fetch_optional(&self.pool)
            .await?;

            Ok(found_or_missing(row))
        })
        .await
    }

    async fn get_image(&self, req: &GetImageRequest) -> Result<GetImageResponse, RepositoryError> {
        self.bounded(async {
            let row: Option<ImageRow> =
                sqlx::query_as("SELECT uid, image FROM shop.image WHERE uid = $1")
                    .bind(req.uid)
                    .fetch_optional(&self.pool)
                    .await?;

            Ok(found_or_missing(row))
        })
        .await
    }
}

fn found_or_missing(row: Option<ImageRow>) -> GetImageResponse {
    row.map_or_else(
        || GetImageResponse::with_status(Status::NotFound),
        |row| GetImageResponse::found(row.uid, row.image),
    )
}
