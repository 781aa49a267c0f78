//! Supplier phone number type.

use core::fmt;

use phonenumber::country;
use serde::{Deserialize, Serialize};

/// Region assumed when the input carries no region suffix.
pub const DEFAULT_REGION: &str = "RU";

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PhoneNumberError {
    /// The input string is empty.
    #[error("phone number cannot be empty")]
    Empty,
    /// The region suffix is not a known ISO 3166 code.
    #[error("unknown phone region: {0}")]
    UnknownRegion(String),
    /// The number could not be parsed at all.
    #[error("failed parsing phone number: {0}")]
    Parse(String),
    /// The number parsed but is not valid for the region.
    #[error("Invalid number for region: {0}")]
    InvalidForRegion(String),
}

/// A phone number validated against a telephony region.
///
/// Input is either `"<number>"` (region [`DEFAULT_REGION`]) or
/// `"<number> <REGION>"`, e.g. `"+79336579933 RU"`. The original input is
/// kept verbatim; validation never rewrites it.
///
/// ## Examples
///
/// ```
/// use shopapi_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("+79336579933 RU").is_ok());
/// assert!(PhoneNumber::parse("+79336579933").is_ok());
/// assert!(PhoneNumber::parse("12").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse and validate a phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, names an unknown region, fails
    /// to parse, or is not a valid number for its region.
    pub fn parse(s: &str) -> Result<Self, PhoneNumberError> {
        if s.trim().is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        let parts: Vec<&str> = s.split(' ').collect();
        let (number, region) = match parts.as_slice() {
            [number, region] => (*number, *region),
            _ => (s, DEFAULT_REGION),
        };

        let region_id: country::Id = region
            .parse()
            .map_err(|_| PhoneNumberError::UnknownRegion(region.to_owned()))?;

        let parsed = phonenumber::parse(Some(region_id), number)
            .map_err(|e| PhoneNumberError::Parse(e.to_string()))?;

        if !phonenumber::is_valid(&parsed) || parsed.country().id() != Some(region_id) {
            return Err(PhoneNumberError::InvalidForRegion(region.to_owned()));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the phone number as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PhoneNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PhoneNumber {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Stored numbers were validated on the way in
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PhoneNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_region() {
        let phone = PhoneNumber::parse("+79336579933 RU").unwrap();
        assert_eq!(phone.as_str(), "+79336579933 RU");
    }

    #[test]
    fn test_parse_defaults_to_ru() {
        assert!(PhoneNumber::parse("+79336579933").is_ok());
        assert!(PhoneNumber::parse("89336579933").is_ok());
    }

    #[test]
    fn test_parse_other_region() {
        assert!(PhoneNumber::parse("+14155552671 US").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(PhoneNumber::parse(""), Err(PhoneNumberError::Empty)));
        assert!(matches!(PhoneNumber::parse("   "), Err(PhoneNumberError::Empty)));
    }

    #[test]
    fn test_parse_unknown_region() {
        assert!(matches!(
            PhoneNumber::parse("+79336579933 QQ"),
            Err(PhoneNumberError::UnknownRegion(_))
        ));
    }

    #[test]
    fn test_parse_fictional_exchange_rejected() {
        assert!(matches!(
            PhoneNumber::parse("+15551234567 US"),
            Err(PhoneNumberError::InvalidForRegion(region)) if region == "US"
        ));
    }

    #[test]
    fn test_parse_wrong_region() {
        assert!(PhoneNumber::parse("+79336579933 US").is_err());
    }

    #[test]
    fn test_parse_too_short() {
        assert!(PhoneNumber::parse("12").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Result<PhoneNumber, _> = serde_json::from_str("\"+79336579933 RU\"");
        assert!(ok.is_ok());
        let bad: Result<PhoneNumber, _> = serde_json::from_str("\"hello\"");
        assert!(bad.is_err());
    }
}
