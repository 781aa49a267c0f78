//! Outcome statuses and small enumerations shared by every operation.

use serde::{Deserialize, Serialize};

/// Domain outcome carried in a response's `status` field.
///
/// An absent status means success. The serialized strings are part of the
/// wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Explicit success marker.
    #[serde(rename = "Success")]
    Success,
    /// The addressed entity does not exist.
    #[serde(rename = "resource not found")]
    NotFound,
    /// An entity with the supplied UID already exists.
    #[serde(rename = "resource already exists")]
    AlreadyExists,
    /// The service could not complete the request.
    #[serde(rename = "service failed exec request")]
    ServiceError,
    /// A stock decrease would drive the stock below zero.
    #[serde(rename = "not enough to decrease")]
    NotEnoughStock,
    /// A product referenced a supplier or image that does not exist.
    #[serde(rename = "not exists image or supplier")]
    MissingImageOrSupplier,
}

impl Status {
    /// The wire string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::NotFound => "resource not found",
            Self::AlreadyExists => "resource already exists",
            Self::ServiceError => "service failed exec request",
            Self::NotEnoughStock => "not enough to decrease",
            Self::MissingImageOrSupplier => "not exists image or supplier",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "shop.gender", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            _ => Err(format!("invalid gender: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_strings() {
        for status in [
            Status::Success,
            Status::NotFound,
            Status::AlreadyExists,
            Status::ServiceError,
            Status::NotEnoughStock,
            Status::MissingImageOrSupplier,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(serde_json::from_str::<Status>(&json).unwrap(), status);
        }
    }

    #[test]
    fn test_gender_lowercase() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
        assert!(serde_json::from_str::<Gender>("\"Male\"").is_err());
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
    }
}
