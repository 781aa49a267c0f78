//! Supplier entity and its operations.

use serde::{Deserialize, Serialize};

use super::{Address, Page, ValidationError, impl_response, require};
use crate::types::{PhoneNumber, Status, SupplierUid};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(default)]
    pub uid: SupplierUid,
    pub name: String,
    pub phone_number: PhoneNumber,
    pub address: Address,
}

impl Supplier {
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        self.address.validate()
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSupplierRequest {
    #[serde(flatten)]
    pub supplier: Supplier,
    #[serde(default)]
    pub avoid_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSupplierAddressRequest {
    pub uid: SupplierUid,
    pub address: Address,
    #[serde(default)]
    pub avoid_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSupplierRequest {
    pub uid: SupplierUid,
    #[serde(default)]
    pub avoid_cache: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSuppliersRequest {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub avoid_cache: bool,
}

impl GetSuppliersRequest {
    #[must_use]
    pub const fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSupplierRequest {
    pub uid: SupplierUid,
    #[serde(default)]
    pub avoid_cache: bool,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSupplierResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<SupplierUid>,
}

impl AddSupplierResponse {
    #[must_use]
    pub fn created(uid: SupplierUid) -> Self {
        Self {
            uid: Some(uid),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSupplierAddressResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSupplierResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSupplierResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Supplier>,
}

impl GetSupplierResponse {
    #[must_use]
    pub fn found(supplier: Supplier) -> Self {
        Self {
            supplier: Some(supplier),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSuppliersResponse {
    #[serde(default)]
    pub cached: bool,
    pub suppliers: Vec<Supplier>,
}

impl_response!(
    status: AddSupplierResponse,
    UpdateSupplierAddressResponse,
    DeleteSupplierResponse,
    GetSupplierResponse,
);
impl_response!(listing: GetSuppliersResponse);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_validates_phone() {
        let body = r#"{
            "name": "Acme",
            "phone_number": "+14155552671 US",
            "address": {"country": "USA", "city": "Austin", "street": "1 Main"}
        }"#;
        let req: AddSupplierRequest = serde_json::from_str(body).unwrap();
        assert!(!req.avoid_cache);
        assert_eq!(req.supplier.phone_number.as_str(), "+14155552671 US");

        let bad = body.replace("+14155552671 US", "not a phone");
        assert!(serde_json::from_str::<AddSupplierRequest>(&bad).is_err());
    }

    #[test]
    fn test_get_response_shape() {
        let json = serde_json::to_value(GetSupplierResponse::with_status(Status::NotFound)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "resource not found", "cached": false})
        );
    }
}
