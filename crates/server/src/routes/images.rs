//! Image route handlers.
//!
//! Uploads are `multipart/form-data` with an `image` file field, an optional
//! `uid` field (required for updates) and an optional `avoid_cache` field.
//! Downloads stream the stored bytes as an attachment; a lookup that found
//! nothing answers with the JSON status body instead.

use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Multipart, Query, State,
        multipart::MultipartRejection,
        rejection::{JsonRejection, QueryRejection},
    },
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};
use shopapi_core::{
    AddImageRequest, AddImageResponse, DeleteImageRequest, DeleteImageResponse, GetImageRequest,
    GetImageResponse, GetProductImageRequest, ImageUid, UpdateImageRequest, UpdateImageResponse,
};

use super::{Reply, reply};
use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::upload::{DEFAULT_MAX_BYTES, ImageKind, UploadError, UploadPolicy};

/// Room for multipart boundaries and the text fields around the file.
const FORM_OVERHEAD: usize = 64 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/image",
            get(download).post(upload).patch(replace).delete(delete),
        )
        .route("/image/product", get(download_for_product))
        .layer(DefaultBodyLimit::max(DEFAULT_MAX_BYTES + FORM_OVERHEAD))
}

/// Fields collected from an upload form.
#[derive(Debug, Default)]
struct ImageForm {
    uid: Option<ImageUid>,
    image: Vec<u8>,
    avoid_cache: bool,
}

async fn read_form(policy: &UploadPolicy, mut multipart: Multipart) -> Result<ImageForm> {
    let mut form = ImageForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "image" => form.image = field.bytes().await?.to_vec(),
            "uid" => {
                let text = field.text().await?;
                let text = text.trim();
                if !text.is_empty() {
                    form.uid = Some(text.parse().map_err(|e| {
                        AppError::BadRequest(format!("invalid uid '{text}': {e}"))
                    })?);
                }
            }
            "avoid_cache" => {
                let text = field.text().await?;
                form.avoid_cache = text.trim().parse().map_err(|e| {
                    AppError::BadRequest(format!("invalid avoid_cache '{text}': {e}"))
                })?;
            }
            _ => {}
        }
    }

    policy.check("image", &form.image)?;
    Ok(form)
}

pub async fn upload(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Reply<AddImageResponse>> {
    let form = read_form(state.upload(), multipart?).await?;
    let req = AddImageRequest {
        uid: form.uid.unwrap_or_default(),
        image: form.image,
        avoid_cache: form.avoid_cache,
    };
    reply(state.service().add_image(&req).await)
}

pub async fn replace(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Reply<UpdateImageResponse>> {
    let form = read_form(state.upload(), multipart?).await?;
    let uid = form.uid.ok_or(UploadError::Missing("uid"))?;
    let req = UpdateImageRequest {
        uid,
        image: form.image,
        avoid_cache: form.avoid_cache,
    };
    reply(state.service().update_image(&req).await)
}

pub async fn delete(
    State(state): State<AppState>,
    body: std::result::Result<Json<DeleteImageRequest>, JsonRejection>,
) -> Result<Reply<DeleteImageResponse>> {
    let Json(req) = body?;
    reply(state.service().delete_image(&req).await)
}

pub async fn download(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetImageRequest>, QueryRejection>,
) -> Result<Response> {
    let Query(req) = query?;
    let resp = state
        .service()
        .get_image(&req)
        .await
        .ok_or(AppError::ServiceFailed)?;
    Ok(attachment(resp))
}

pub async fn download_for_product(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetProductImageRequest>, QueryRejection>,
) -> Result<Response> {
    let Query(req) = query?;
    let resp = state
        .service()
        .get_product_image(&req)
        .await
        .ok_or(AppError::ServiceFailed)?;
    Ok(attachment(resp))
}

/// Raw bytes with a download name, or the JSON reply when there is nothing
/// to send.
fn attachment(resp: GetImageResponse) -> Response {
    let has_bytes = resp.image.as_ref().is_some_and(|bytes| !bytes.is_empty());
    let (Some(uid), true) = (resp.uid, has_bytes) else {
        return Reply(resp).into_response();
    };

    let body = resp.image.unwrap_or_default();
    let kind = ImageKind::sniff(&body);
    let content_type = kind.map_or("application/octet-stream", ImageKind::mime);
    let disposition = disposition(uid, kind, chrono::Utc::now());
    (
        [
            (header::CONTENT_TYPE, content_type.to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

fn disposition(
    uid: ImageUid,
    kind: Option<ImageKind>,
    now: chrono::DateTime<chrono::Utc>,
) -> String {
    let ext = kind.map_or("", ImageKind::extension);
    format!(
        "attachment; filename=\"file_{uid}_{}{ext}\"",
        now.format("%Y-%m-%d_%H-%M-%S")
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use chrono::TimeZone;
    use shopapi_core::Status;

    use super::*;

    fn uid() -> ImageUid {
        "376de312-5bcb-4320-8ba3-bd2050548229".parse().unwrap()
    }

    #[test]
    fn test_disposition() {
        let now = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(
            disposition(uid(), Some(ImageKind::Png), now),
            "attachment; filename=\"file_376de312-5bcb-4320-8ba3-bd2050548229_2026-03-01_09-05-07.png\""
        );
        assert!(disposition(uid(), None, now).ends_with("09-05-07\""));
    }

    #[tokio::test]
    async fn test_attachment_streams_bytes() {
        let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let response = attachment(GetImageResponse::found(uid(), bytes.clone()));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_owned();
        assert!(disposition.ends_with(".jpg\""));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body.as_ref(), bytes.as_slice());
    }

    #[test]
    fn test_attachment_unknown_format_is_octet_stream() {
        let response = attachment(GetImageResponse::found(uid(), b"GIF89a".to_vec()));
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_attachment_not_found_is_json() {
        let response = attachment(GetImageResponse::with_status(Status::NotFound));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "resource not found");
    }
}
