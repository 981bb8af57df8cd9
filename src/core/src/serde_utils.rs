//! Serde adapters for the JSON encodings used by beacon nodes.
//!
//! Beacon nodes quote 64-bit integers as decimal strings and encode byte
//! strings as `0x`-prefixed hex.

use crate::errors::CoreError;

/// Decodes a hex string, with or without a `0x` prefix.
pub fn decode_hex(value: &str) -> Result<Vec<u8>, CoreError> {
    let trimmed = value.strip_prefix("0x").unwrap_or(value);
    Ok(hex::decode(trimmed)?)
}

/// Decodes a hex string into a fixed-size array.
pub fn decode_hex_array<const N: usize>(
    kind: &'static str,
    value: &str,
) -> Result<[u8; N], CoreError> {
    let bytes = decode_hex(value)?;
    if bytes.len() != N {
        return Err(CoreError::InvalidLength {
            kind,
            expected: N,
            actual: bytes.len(),
        });
    }
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Encodes bytes as `0x`-prefixed lowercase hex.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// `u64` values carried as decimal strings. Bare JSON numbers are accepted
/// when reading.
pub mod quoted_u64 {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QuotedVisitor;

        impl<'de> Visitor<'de> for QuotedVisitor {
            type Value = u64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a u64 or a decimal string")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(v)
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse::<u64>()
                    .map_err(|e| E::custom(format!("invalid quoted u64 {:?}: {}", v, e)))
            }
        }

        deserializer.deserialize_any(QuotedVisitor)
    }
}

/// Fixed-size byte arrays carried as `0x` hex strings.
pub mod hex_array {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, const N: usize>(bytes: &[u8; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::encode_hex(bytes))
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[u8; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::decode_hex_array::<N>("byte array", &s).map_err(serde::de::Error::custom)
    }
}
