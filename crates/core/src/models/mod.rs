//! Entities and the request/response contracts of every operation.
//!
//! Responses share two capabilities: [`HasStatus`] exposes the domain
//! outcome (absent means success) and [`CacheFlag`] lets the service mark
//! whether a value was served from cache.

pub mod client;
pub mod image;
pub mod product;
pub mod supplier;

use serde::{Deserialize, Serialize};

use crate::types::Status;

pub use client::*;
pub use image::*;
pub use product::*;
pub use supplier::*;

/// Postal address shared between clients and suppliers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub country: String,
    pub city: String,
    pub street: String,
}

impl Address {
    /// Check that every component is present.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("address.country", &self.country)?;
        require("address.city", &self.city)?;
        require("address.street", &self.street)
    }
}

/// Paging parameters. `limit == 0 && offset == 0` selects everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

impl Page {
    /// Whether the page selects all rows.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.limit == 0 && self.offset == 0
    }
}

/// A request field failed a presence or range check.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{0}' is required")]
    Empty(&'static str),
    #[error("field '{0}' cannot be negative")]
    Negative(&'static str),
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(())
}

/// Read access to a response's domain outcome.
pub trait HasStatus {
    /// The outcome, or `None` for a plain success.
    fn status(&self) -> Option<Status>;
}

/// Write access to a response's `cached` marker.
pub trait CacheFlag {
    fn set_cached(&mut self, cached: bool);
}

/// Implements [`HasStatus`] and [`CacheFlag`] for response structs.
///
/// `status:` types carry `status: Option<Status>` and `cached: bool` and get
/// a `with_status` constructor. `listing:` types only carry `cached`.
macro_rules! impl_response {
    (status: $($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// A response carrying only a domain outcome.
                #[must_use]
                pub fn with_status(status: $crate::types::Status) -> Self {
                    Self {
                        status: Some(status),
                        ..Self::default()
                    }
                }
            }

            impl $crate::models::HasStatus for $ty {
                fn status(&self) -> Option<$crate::types::Status> {
                    self.status
                }
            }

            impl $crate::models::CacheFlag for $ty {
                fn set_cached(&mut self, cached: bool) {
                    self.cached = cached;
                }
            }
        )+
    };
    (listing: $($ty:ty),+ $(,)?) => {
        $(
            impl $crate::models::HasStatus for $ty {
                fn status(&self) -> Option<$crate::types::Status> {
                    None
                }
            }

            impl $crate::models::CacheFlag for $ty {
                fn set_cached(&mut self, cached: bool) {
                    self.cached = cached;
                }
            }
        )+
    };
}

pub(crate) use impl_response;
