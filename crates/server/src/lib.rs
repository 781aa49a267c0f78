//! shopapi server library.
//!
//! Transactional CRUD for clients, suppliers, products and images over
//! `PostgreSQL`, with a read-through cache in front of every read and
//! idempotent write. Exposed as a library so the router can be exercised
//! in tests without binding a socket.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod service;
pub mod state;
pub mod upload;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/health/ready", get(routes::readiness))
        .nest("/api/v1", routes::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}
