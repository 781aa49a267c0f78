//! Image blobs and their operations.
//!
//! Image bytes travel as base64 strings inside JSON (cache entries, JSON
//! error bodies). The HTTP layer serves them raw.

use serde::{Deserialize, Serialize};

use super::impl_response;
use crate::types::{ImageUid, ProductUid, Status};

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => s.serialize_str(&STANDARD.encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|encoded| STANDARD.decode(encoded).map_err(serde::de::Error::custom))
            .transpose()
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Built by the transport from a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddImageRequest {
    pub uid: ImageUid,
    pub image: Vec<u8>,
    pub avoid_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateImageRequest {
    pub uid: ImageUid,
    pub image: Vec<u8>,
    pub avoid_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteImageRequest {
    pub uid: ImageUid,
    #[serde(default)]
    pub avoid_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProductImageRequest {
    pub product_uid: ProductUid,
    #[serde(default)]
    pub avoid_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetImageRequest {
    pub uid: ImageUid,
    #[serde(default)]
    pub avoid_cache: bool,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddImageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<ImageUid>,
}

impl AddImageResponse {
    #[must_use]
    pub fn created(uid: ImageUid) -> Self {
        Self {
            uid: Some(uid),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateImageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteImageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
}

/// Result of both image lookups (by UID and by product).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetImageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<ImageUid>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "base64_bytes"
    )]
    pub image: Option<Vec<u8>>,
}

impl GetImageResponse {
    #[must_use]
    pub fn found(uid: ImageUid, image: Vec<u8>) -> Self {
        Self {
            uid: Some(uid),
            image: Some(image),
            ..Self::default()
        }
    }
}

/// Same shape as [`GetImageResponse`], cached under its own key space.
pub type GetProductImageResponse = GetImageResponse;

impl_response!(
    status: AddImageResponse,
    UpdateImageResponse,
    DeleteImageResponse,
    GetImageResponse,
);
