//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                   - Liveness
//! GET    /health/ready             - Readiness (database reachable)
//!
//! # Clients (JSON body unless noted)
//! POST   /api/v1/client            - Add client
//! DELETE /api/v1/client            - Delete client
//! GET    /api/v1/clients           - Page of clients (query)
//! GET    /api/v1/clients/named     - Clients by name and surname (query)
//! PATCH  /api/v1/client/address    - Replace client address
//!
//! # Products
//! POST   /api/v1/product           - Add product
//! PATCH  /api/v1/product           - Decrease stock
//! GET    /api/v1/product           - Product by UID (query)
//! GET    /api/v1/products          - Page of products (query)
//! DELETE /api/v1/product           - Delete product
//!
//! # Suppliers
//! POST   /api/v1/supplier          - Add supplier
//! PATCH  /api/v1/supplier/address  - Replace supplier address
//! DELETE /api/v1/supplier          - Delete supplier
//! GET    /api/v1/supplier          - Supplier by UID (query)
//! GET    /api/v1/suppliers         - Page of suppliers (query)
//!
//! # Images
//! POST   /api/v1/image             - Upload image (multipart)
//! PATCH  /api/v1/image             - Replace image bytes (multipart)
//! GET    /api/v1/image             - Download image (query)
//! GET    /api/v1/image/product     - Download a product's image (query)
//! DELETE /api/v1/image             - Delete image
//! ```

pub mod clients;
pub mod images;
pub mod products;
pub mod suppliers;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shopapi_core::HasStatus;

use crate::error::{AppError, Result, status_code};
use crate::state::AppState;

/// All `/api/v1` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(clients::routes())
        .merge(products::routes())
        .merge(suppliers::routes())
        .merge(images::routes())
}

/// A service response written as JSON with the status mapped to HTTP.
#[derive(Debug)]
pub struct Reply<T>(pub T);

impl<T: HasStatus + Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (status_code(self.0.status()), Json(self.0)).into_response()
    }
}

/// Turn a service result into a reply; `None` means the service failed.
fn reply<T>(resp: Option<T>) -> Result<Reply<T>> {
    resp.map(Reply).ok_or(AppError::ServiceFailed)
}

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
