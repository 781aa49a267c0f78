//! Newtype UIDs for type-safe entity references.
//!
//! Every stored entity is addressed by a UUID. The `define_uid!` macro wraps
//! it per entity so a supplier UID cannot be passed where an image UID is
//! expected.

/// Macro to define a type-safe UUID wrapper.
///
/// Creates a newtype wrapper around `uuid::Uuid` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Default` yielding the nil UUID, which marks "not supplied"
/// - `generate()` and `or_generate()` for server-side assignment
/// - `Display` and `FromStr` using the hyphenated form
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use shopapi_core::define_uid;
/// define_uid!(WarehouseUid);
///
/// let supplied = WarehouseUid::default();
/// assert!(supplied.is_nil());
/// assert!(!supplied.or_generate().is_nil());
/// ```
#[macro_export]
macro_rules! define_uid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Wrap an existing UUID.
            #[must_use]
            pub const fn new(uid: ::uuid::Uuid) -> Self {
                Self(uid)
            }

            /// Generate a fresh random (v4) UID.
            #[must_use]
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Keep a caller-supplied UID, or generate one if it is nil.
            #[must_use]
            pub fn or_generate(self) -> Self {
                if self.is_nil() { Self::generate() } else { self }
            }

            /// Whether the UID is the all-zero value.
            #[must_use]
            pub const fn is_nil(&self) -> bool {
                self.0.is_nil()
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> ::uuid::Uuid {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(uid: ::uuid::Uuid) -> Self {
                Self(uid)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(uid: $name) -> Self {
                uid.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <::uuid::Uuid as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <::uuid::Uuid as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                <::uuid::Uuid as ::sqlx::Decode<::sqlx::Postgres>>::decode(value).map(Self)
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <::uuid::Uuid as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

define_uid!(ClientUid);
define_uid!(SupplierUid);
define_uid!(ProductUid);
define_uid!(ImageUid);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_nil() {
        assert!(ClientUid::default().is_nil());
        assert_eq!(
            serde_json::to_string(&ClientUid::default()).unwrap(),
            "\"00000000-0000-0000-0000-000000000000\""
        );
    }

    #[test]
    fn test_or_generate_keeps_supplied_uid() {
        let supplied: SupplierUid = "3f2a1b7c-1111-4a2b-9c3d-0123456789ab".parse().unwrap();
        assert_eq!(supplied.or_generate(), supplied);
    }

    #[test]
    fn test_or_generate_replaces_nil() {
        let generated = ProductUid::default().or_generate();
        assert!(!generated.is_nil());
        assert_ne!(generated, ProductUid::default().or_generate());
    }

    #[test]
    fn test_serde_transparent() {
        let uid: ImageUid = serde_json::from_str("\"3f2a1b7c-1111-4a2b-9c3d-0123456789ab\"").unwrap();
        assert_eq!(uid.to_string(), "3f2a1b7c-1111-4a2b-9c3d-0123456789ab");
    }

    #[test]
    fn test_rejects_malformed() {
        assert!("not-a-uuid".parse::<ClientUid>().is_err());
    }
}
