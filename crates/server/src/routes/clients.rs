//! Client route handlers.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::{get, patch, post},
};
use shopapi_core::{
    AddClientRequest, AddClientResponse, DeleteClientRequest, DeleteClientResponse,
    GetClientsByNameRequest, GetClientsByNameResponse, GetClientsRequest, GetClientsResponse,
    PatchClientAddressRequest, PatchClientAddressResponse,
};

use super::{Reply, reply};
use crate::error::Result;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/client", post(add).delete(delete))
        .route("/clients", get(list))
        .route("/clients/named", get(by_name))
        .route("/client/address", patch(patch_address))
}

pub async fn add(
    State(state): State<AppState>,
    body: std::result::Result<Json<AddClientRequest>, JsonRejection>,
) -> Result<Reply<AddClientResponse>> {
    let Json(req) = body?;
    req.client.validate()?;
    reply(state.service().add_client(&req).await)
}

pub async fn delete(
    State(state): State<AppState>,
    body: std::result::Result<Json<DeleteClientRequest>, JsonRejection>,
) -> Result<Reply<DeleteClientResponse>> {
    let Json(req) = body?;
    reply(state.service().delete_client(&req).await)
}

pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetClientsRequest>, QueryRejection>,
) -> Result<Reply<GetClientsResponse>> {
    let Query(req) = query?;
    reply(state.service().get_clients(&req).await)
}

pub async fn by_name(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetClientsByNameRequest>, QueryRejection>,
) -> Result<Reply<GetClientsByNameResponse>> {
    let Query(req) = query?;
    req.validate()?;
    reply(state.service().get_clients_by_name(&req).await)
}

pub async fn patch_address(
    State(state): State<AppState>,
    body: std::result::Result<Json<PatchClientAddressRequest>, JsonRejection>,
) -> Result<Reply<PatchClientAddressResponse>> {
    let Json(req) = body?;
    req.address.validate()?;
    reply(state.service().patch_client_address(&req).await)
}
