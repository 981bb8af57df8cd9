//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Error when a byte string has the wrong length for its type.
    #[error("Invalid length for {kind}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// What was being decoded
        kind: &'static str,
        /// The expected length
        expected: usize,
        /// The actual length
        actual: usize,
    },

    /// Error when a hex string cannot be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Error when secret key material is rejected by the BLS library.
    #[error("Invalid secret key: {0}")]
    InvalidSecretKey(String),

    /// Error when a public key is not a valid G1 point.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Error when a signature is not a valid G2 point.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Error when a key derivation path cannot be parsed.
    #[error("Invalid derivation path {path:?}: {reason}")]
    InvalidPath {
        /// The offending path
        path: String,
        /// Why it was rejected
        reason: String,
    },
}
