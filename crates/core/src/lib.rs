//! Shop API Core - Shared types library.
//!
//! This crate provides the domain vocabulary used by every shop API component:
//! - `server` - Storage backend, cache, service orchestrator and HTTP transport
//! - `cli` - Command-line tools for migrations
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. The optional `postgres` feature adds `sqlx` encode/decode
//! support for the UID and phone types.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for UIDs, prices, dates, phone numbers and statuses
//! - [`models`] - Entities plus the request and response contract of each operation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
