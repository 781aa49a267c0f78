//! Cache key construction.
//!
//! A key is the operation name followed by its parameters, joined by `:`.
//! Payload-carrying operations contribute a 64-bit FNV-1a hash of the
//! payload's JSON encoding instead of the payload itself.

use std::hash::Hasher;

use fnv::FnvHasher;
use serde::Serialize;

/// Join an operation name and its parameters into a key.
#[must_use]
pub fn cache_key(operation: &str, parts: &[&str]) -> String {
    let mut key = String::from(operation);
    for part in parts {
        key.push(':');
        key.push_str(part);
    }
    key
}

/// FNV-1a (64-bit) hash of the JSON encoding of `value`, in decimal.
///
/// # Errors
///
/// Returns the encoder error if `value` cannot be serialized.
pub fn content_hash<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let encoded = serde_json::to_vec(value)?;
    Ok(bytes_hash(&encoded))
}

/// FNV-1a (64-bit) hash of raw bytes, in decimal.
#[must_use]
pub fn bytes_hash(bytes: &[u8]) -> String {
    let mut hasher = FnvHasher::default();
    hasher.write(bytes);
    hasher.finish().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_joins_parts() {
        assert_eq!(cache_key("GetClients", &["10", "0"]), "GetClients:10:0");
        assert_eq!(cache_key("AddClient", &[]), "AddClient");
    }

    #[test]
    fn test_fnv1a_reference_values() {
        // Published FNV-1a 64-bit test vectors
        assert_eq!(bytes_hash(b""), 0xcbf2_9ce4_8422_2325_u64.to_string());
        assert_eq!(bytes_hash(b"a"), 0xaf63_dc4c_8601_ec8c_u64.to_string());
    }

    #[test]
    fn test_content_hash_is_deterministic() {
        let a = serde_json::json!({"name": "Acme", "city": "Austin"});
        assert_eq!(content_hash(&a).unwrap(), content_hash(&a).unwrap());
    }

    #[test]
    fn test_content_hash_distinguishes_payloads() {
        let a = ("Vasilisa", "Kadyk");
        let b = ("Vasilisa", "Kadik");
        assert_ne!(content_hash(&a).unwrap(), content_hash(&b).unwrap());

        // Separator characters inside fields cannot collide
        let c = ("a:b", "c");
        let d = ("a", "b:c");
        assert_ne!(content_hash(&c).unwrap(), content_hash(&d).unwrap());
    }
}
