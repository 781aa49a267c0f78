//! Supplier route handlers.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, patch, post},
};
use shopapi_core::{
    AddSupplierRequest, AddSupplierResponse, DeleteSupplierRequest, DeleteSupplierResponse,
    GetSupplierRequest, GetSupplierResponse, GetSuppliersRequest, GetSuppliersResponse,
    UpdateSupplierAddressRequest, UpdateSupplierAddressResponse,
};

use super::{Reply, reply};
use crate::error::Result;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/supplier", post(add).delete(delete).get(get_one))
        .route("/supplier/address", patch(update_address))
        .route("/suppliers", get(list))
}

pub async fn add(
    State(state): State<AppState>,
    body: std::result::Result<Json<AddSupplierRequest>, JsonRejection>,
) -> Result<Reply<AddSupplierResponse>> {
    let Json(req) = body?;
    req.supplier.validate()?;
    reply(state.service().add_supplier(&req).await)
}

pub async fn update_address(
    State(state): State<AppState>,
    body: std::result::Result<Json<UpdateSupplierAddressRequest>, JsonRejection>,
) -> Result<Reply<UpdateSupplierAddressResponse>> {
    let Json(req) = body?;
    req.address.validate()?;
    reply(state.service().update_supplier_address(&req).await)
}

pub async fn delete(
    State(state): State<AppState>,
    body: std::result::Result<Json<DeleteSupplierRequest>, JsonRejection>,
) -> Result<Reply<DeleteSupplierResponse>> {
    let Json(req) = body?;
    reply(state.service().delete_supplier(&req).await)
}

pub async fn get_one(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetSupplierRequest>, QueryRejection>,
) -> Result<Reply<GetSupplierResponse>> {
    let Query(req) = query?;
    reply(state.service().get_supplier(&req).await)
}

pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetSuppliersRequest>, QueryRejection>,
) -> Result<Reply<GetSuppliersResponse>> {
    let Query(req) = query?;
    reply(state.service().get_suppliers(&req).await)
}
