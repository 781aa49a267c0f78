//! Client entity and its operations.

use serde::{Deserialize, Serialize};

use super::{Address, Page, ValidationError, impl_response, require};
use crate::types::{ClientUid, DateOnly, Gender, Status};

/// A registered client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Nil when the caller lets the server assign one.
    #[serde(default)]
    pub uid: ClientUid,
    pub birthday: DateOnly,
    pub registration_date: DateOnly,
    #[serde(rename = "client_name")]
    pub name: String,
    #[serde(rename = "client_surname")]
    pub surname: String,
    pub gender: Gender,
    pub address: Address,
}

impl Client {
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("client_name", &self.name)?;
        require("client_surname", &self.surname)?;
        self.address.validate()
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddClientRequest {
    #[serde(flatten)]
    pub client: Client,
    #[serde(default)]
    pub avoid_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteClientRequest {
    pub uid: ClientUid,
    #[serde(default)]
    pub avoid_cache: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetClientsRequest {
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub avoid_cache: bool,
}

impl GetClientsRequest {
    #[must_use]
    pub const fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetClientsByNameRequest {
    #[serde(rename = "client_name")]
    pub name: String,
    #[serde(rename = "client_surname")]
    pub surname: String,
    #[serde(default)]
    pub avoid_cache: bool,
}

impl GetClientsByNameRequest {
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("client_name", &self.name)?;
        require("client_surname", &self.surname)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchClientAddressRequest {
    pub uid: ClientUid,
    pub address: Address,
    #[serde(default)]
    pub avoid_cache: bool,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddClientResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<ClientUid>,
}

impl AddClientResponse {
    #[must_use]
    pub fn created(uid: ClientUid) -> Self {
        Self {
            uid: Some(uid),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteClientResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchClientAddressResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetClientsResponse {
    #[serde(default)]
    pub cached: bool,
    pub clients: Vec<Client>,
}

/// Same shape as [`GetClientsResponse`]; kept separate so cache entries of
/// the two operations can never be confused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetClientsByNameResponse {
    #[serde(default)]
    pub cached: bool,
    pub clients: Vec<Client>,
}

impl_response!(status: AddClientResponse, DeleteClientResponse, PatchClientAddressResponse);
impl_response!(listing: GetClientsResponse, GetClientsByNameResponse);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{CacheFlag, HasStatus};

    const ADD_BODY: &str = r#"{
        "birthday": "10.12.2011",
        "registration_date": "30/01/2026",
        "client_name": "Vasilisa",
        "client_surname": "Kadyk",
        "gender": "female",
        "address": {"country": "USA", "city": "Seattle", "street": "12th Ave E"},
        "avoid_cache": true
    }"#;

    #[test]
    fn test_add_request_decodes_flattened_client() {
        let req: AddClientRequest = serde_json::from_str(ADD_BODY).unwrap();
        assert!(req.avoid_cache);
        assert!(req.client.uid.is_nil());
        assert_eq!(req.client.name, "Vasilisa");
        assert_eq!(req.client.birthday.to_string(), "2011-12-10");
        assert!(req.client.validate().is_ok());
    }

    #[test]
    fn test_add_request_rejects_unknown_gender() {
        let body = ADD_BODY.replace("female", "other");
        assert!(serde_json::from_str::<AddClientRequest>(&body).is_err());
    }

    #[test]
    fn test_response_omits_absent_fields() {
        let json = serde_json::to_value(DeleteClientResponse::default()).unwrap();
        assert_eq!(json, serde_json::json!({"cached": false}));

        let json = serde_json::to_value(DeleteClientResponse::with_status(Status::NotFound)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "resource not found", "cached": false})
        );
    }

    #[test]
    fn test_response_capabilities() {
        let mut resp = AddClientResponse::with_status(Status::AlreadyExists);
        assert_eq!(resp.status(), Some(Status::AlreadyExists));
        resp.set_cached(true);
        assert!(resp.cached);

        let listing = GetClientsResponse::default();
        assert_eq!(listing.status(), None);
    }

    #[test]
    fn test_by_name_requires_both_parts() {
        let req = GetClientsByNameRequest {
            name: "Vasilisa".into(),
            surname: String::new(),
            avoid_cache: false,
        };
        assert_eq!(req.validate(), Err(ValidationError::Empty("client_surname")));
    }
}
