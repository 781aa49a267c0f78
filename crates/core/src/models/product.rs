//! Product entity and its operations.

use serde::{Deserialize, Serialize};

use super::{Page, ValidationError, impl_response, require};
use crate::types::{DateOnly, ImageUid, Price, ProductUid, Status, SupplierUid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub uid: ProductUid,
    pub name: String,
    pub category: String,
    pub price: Price,
    pub available_stock: i64,
    /// Set to today by storage when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update_date: Option<DateOnly>,
    #[serde(rename = "supplier_id")]
    pub supplier_uid: SupplierUid,
    #[serde(rename = "image_id")]
    pub image_uid: ImageUid,
}

impl Product {
    /// Zero price and zero stock are accepted; only negatives are rejected.
    ///
    /// # Errors
    ///
    /// Returns the first missing or negative field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("category", &self.category)?;
        if self.price.amount().is_sign_negative() && !self.price.amount().is_zero() {
            return Err(ValidationError::Negative("price"));
        }
        if self.available_stock < 0 {
            return Err(ValidationError::Negative("available_stock"));
        }
        if self.supplier_uid.is_nil() {
            return Err(ValidationError::Empty("supplier_id"));
        }
        if self.image_uid.is_nil() {
            return Err(ValidationError::Empty("image_id"));
        }
        Ok(())
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProductRequest {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default)]
    pub avoid_cache: bool,
}

/// Never cached: every call must reach storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecreaseProductsRequest {
    pub uid: ProductUid,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProductRequest {
    pub uid: ProductUid,
    #[serde(default)]
    pub avoid_cache: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProductsRequest {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub avoid_cache: bool,
}

impl GetProductsRequest {
    #[must_use]
    pub const fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProductRequest {
    pub uid: ProductUid,
    #[serde(default)]
    pub avoid_cache: bool,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProductResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<ProductUid>,
}

impl AddProductResponse {
    #[must_use]
    pub fn created(uid: ProductUid) -> Self {
        Self {
            uid: Some(uid),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecreaseProductsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Stock after the call; unchanged stock on `not enough to decrease`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<i64>,
}

impl DecreaseProductsResponse {
    #[must_use]
    pub const fn left(left: i64) -> Self {
        Self {
            status: None,
            left: Some(left),
        }
    }

    #[must_use]
    pub const fn not_enough(left: i64) -> Self {
        Self {
            status: Some(Status::NotEnoughStock),
            left: Some(left),
        }
    }

    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            status: Some(Status::NotFound),
            left: None,
        }
    }
}

impl super::HasStatus for DecreaseProductsResponse {
    fn status(&self) -> Option<Status> {
        self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProductResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl GetProductResponse {
    #[must_use]
    pub fn found(product: Product) -> Self {
        Self {
            product: Some(product),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProductsResponse {
    #[serde(default)]
    pub cached: bool,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProductResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
}

impl_response!(status: AddProductResponse, GetProductResponse, DeleteProductResponse);
impl_response!(listing: GetProductsResponse);
