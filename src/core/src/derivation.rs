//! Hierarchical key derivation (EIP-2333) along EIP-2334 paths.

use crate::bls::SecretKey;
use crate::errors::CoreError;

/// Purpose component of validator key paths.
pub const PURPOSE: u32 = 12381;

/// Coin type component of validator key paths.
pub const COIN_TYPE: u32 = 3600;

/// Returns the signing key path for the validator at `index`.
pub fn validator_signing_path(index: u64) -> String {
    format!("m/{}/{}/{}/0/0", PURPOSE, COIN_TYPE, index)
}

/// Parses a path of the form `m/a/b/...` into child indices.
pub fn parse_path(path: &str) -> Result<Vec<u32>, CoreError> {
    let invalid = |reason: &str| CoreError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let mut parts = path.split('/');
    if parts.next() != Some("m") {
        return Err(invalid("path must start with m"));
    }

    let indices = parts
        .map(|part| {
            if part.is_empty() {
                return Err(invalid("empty path component"));
            }
            part.parse::<u32>()
                .map_err(|e| invalid(&format!("bad component {:?}: {}", part, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if indices.is_empty() {
        return Err(invalid("path has no components"));
    }
    Ok(indices)
}

/// Derives the secret key at `path` from `seed`.
pub fn derive_path(seed: &[u8], path: &str) -> Result<SecretKey, CoreError> {
    let indices = parse_path(path)?;
    let mut key = SecretKey::derive_master(seed)?;
    for index in indices {
        key = key.derive_child(index);
    }
    Ok(key)
}
