//! Product route handlers.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, post},
};
use shopapi_core::{
    AddProductRequest, AddProductResponse, DecreaseProductsRequest, DecreaseProductsResponse,
    DeleteProductRequest, DeleteProductResponse, GetProductRequest, GetProductResponse,
    GetProductsRequest, GetProductsResponse,
};

use super::{Reply, reply};
use crate::error::Result;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/product",
            post(add).patch(decrease).get(get_one).delete(delete),
        )
        .route("/products", get(list))
}

pub async fn add(
    State(state): State<AppState>,
    body: std::result::Result<Json<AddProductRequest>, JsonRejection>,
) -> Result<Reply<AddProductResponse>> {
    let Json(req) = body?;
    req.product.validate()?;
    reply(state.service().add_product(&req).await)
}

pub async fn decrease(
    State(state): State<AppState>,
    body: std::result::Result<Json<DecreaseProductsRequest>, JsonRejection>,
) -> Result<Reply<DecreaseProductsResponse>> {
    let Json(req) = body?;
    reply(state.service().decrease_products(&req).await)
}

pub async fn get_one(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetProductRequest>, QueryRejection>,
) -> Result<Reply<GetProductResponse>> {
    let Query(req) = query?;
    reply(state.service().get_product(&req).await)
}

pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetProductsRequest>, QueryRejection>,
) -> Result<Reply<GetProductsResponse>> {
    let Query(req) = query?;
    reply(state.service().get_products(&req).await)
}

pub async fn delete(
    State(state): State<AppState>,
    body: std::result::Result<Json<DeleteProductRequest>, JsonRejection>,
) -> Result<Reply<DeleteProductResponse>> {
    let Json(req) = body?;
    reply(state.service().delete_product(&req).await)
}
