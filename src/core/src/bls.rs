//! BLS12-381 keys and signatures as used by the consensus layer.
//!
//! Public keys live in G1 (48 bytes compressed) and signatures in G2 (96
//! bytes compressed). Signing uses the proof-of-possession ciphersuite.

use crate::errors::CoreError;
use crate::serde_utils::{decode_hex, encode_hex};
use blst::{min_pk, BLST_ERROR};
use std::fmt;
use zeroize::Zeroizing;

/// Domain separation tag for consensus-layer signatures.
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Length of a serialized secret key.
pub const SECRET_KEY_LEN: usize = 32;

/// Length of a compressed public key.
pub const PUBLIC_KEY_LEN: usize = 48;

/// Length of a compressed signature.
pub const SIGNATURE_LEN: usize = 96;

/// A BLS secret key.
#[derive(Clone)]
pub struct SecretKey(min_pk::SecretKey);

impl SecretKey {
    /// Generates a key from at least 32 bytes of input keying material.
    pub fn from_ikm(ikm: &[u8]) -> Result<Self, CoreError> {
        min_pk::SecretKey::key_gen(ikm, &[])
            .map(SecretKey)
            .map_err(|e| CoreError::InvalidSecretKey(format!("{:?}", e)))
    }

    /// Parses a big-endian 32-byte scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != SECRET_KEY_LEN {
            return Err(CoreError::InvalidLength {
                kind: "secret key",
                expected: SECRET_KEY_LEN,
                actual: bytes.len(),
            });
        }
        min_pk::SecretKey::from_bytes(bytes)
            .map(SecretKey)
            .map_err(|e| CoreError::InvalidSecretKey(format!("{:?}", e)))
    }

    /// Derives the EIP-2333 master key from a seed.
    pub fn derive_master(seed: &[u8]) -> Result<Self, CoreError> {
        min_pk::SecretKey::derive_master_eip2333(seed)
            .map(SecretKey)
            .map_err(|e| CoreError::InvalidSecretKey(format!("{:?}", e)))
    }

    /// Derives the EIP-2333 child key at `index`.
    pub fn derive_child(&self, index: u32) -> Self {
        SecretKey(self.0.derive_child_eip2333(index))
    }

    /// Serializes the scalar. The buffer is wiped on drop.
    pub fn to_bytes(&self) -> Zeroizing<[u8; SECRET_KEY_LEN]> {
        Zeroizing::new(self.0.to_bytes())
    }

    /// Gets the public key for this secret key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.sk_to_pk().compress())
    }

    /// Signs a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.0.sign(message, DST, &[]).compress())
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// A compressed BLS public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LEN]);

impl PublicKey {
    /// Parses and validates a compressed public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != PUBLIC_KEY_LEN {
            return Err(CoreError::InvalidLength {
                kind: "public key",
                expected: PUBLIC_KEY_LEN,
                actual: bytes.len(),
            });
        }
        min_pk::PublicKey::key_validate(bytes)
            .map_err(|e| CoreError::InvalidPublicKey(format!("{:?}", e)))?;
        let mut out = [0u8; PUBLIC_KEY_LEN];
        out.copy_from_slice(bytes);
        Ok(PublicKey(out))
    }

    /// Parses a `0x`-prefixed hex public key.
    pub fn from_hex(value: &str) -> Result<Self, CoreError> {
        Self::from_bytes(&decode_hex(value)?)
    }

    /// Gets the compressed bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Verifies `signature` over `message` against this key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let pk = match min_pk::PublicKey::from_bytes(&self.0) {
            Ok(pk) => pk,
            Err(_) => return false,
        };
        let sig = match min_pk::Signature::from_bytes(&signature.0) {
            Ok(sig) => sig,
            Err(_) => return false,
        };
        sig.verify(true, message, DST, &[], &pk, true) == BLST_ERROR::BLST_SUCCESS
    }
}

/// A compressed BLS signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    /// Parses and validates a compressed signature.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(CoreError::InvalidLength {
                kind: "signature",
                expected: SIGNATURE_LEN,
                actual: bytes.len(),
            });
        }
        min_pk::Signature::from_bytes(bytes)
            .map_err(|e| CoreError::InvalidSignature(format!("{:?}", e)))?;
        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(bytes);
        Ok(Signature(out))
    }

    /// Parses a `0x`-prefixed hex signature.
    pub fn from_hex(value: &str) -> Result<Self, CoreError> {
        Self::from_bytes(&decode_hex(value)?)
    }

    /// Gets the compressed bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
        &self.0
    }
}

macro_rules! hex_display {
    ($name:ident) => {
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&encode_hex(&self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), encode_hex(&self.0))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&encode_hex(&self.0))
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct HexVisitor;

                impl<'de> serde::de::Visitor<'de> for HexVisitor {
                    type Value = $name;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        write!(formatter, "a hex encoded {}", stringify!($name))
                    }

                    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        $name::from_hex(v).map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(HexVisitor)
            }
        }
    };
}

hex_display!(PublicKey);
hex_display!(Signature);
