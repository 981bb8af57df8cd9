//! Signature commands.
//!
//! Data is signed as an SSZ byte vector: its hash tree root, mixed with the
//! domain, gives the signing root.

use crate::accounts::{account_from_path, unlock_account};
use crate::errors::CliError;
use crate::output::Output;
use crate::signing::{generate_signing_root, sign as sign_root};
use ethdo_core::serde_utils::{decode_hex, decode_hex_array};
use ethdo_core::ssz::bytes_root;
use ethdo_core::{Domain, Hash256, PublicKey, Signature};
use ethdo_wallet::Store;
use tracing::debug;

fn data_root(data: &str) -> Result<Hash256, CliError> {
    let bytes = decode_hex(data).map_err(|e| CliError::InvalidFlag {
        flag: "data",
        message: e.to_string(),
    })?;
    if bytes.is_empty() {
        return Err(CliError::MissingFlag("data"));
    }
    Ok(Hash256::from(bytes_root(&bytes)))
}

fn domain(domain: Option<&str>) -> Result<Domain, CliError> {
    match domain {
        Some(text) => decode_hex_array::<32>("domain", text).map_err(|e| CliError::InvalidFlag {
            flag: "domain",
            message: e.to_string(),
        }),
        None => Ok([0u8; 32]),
    }
}

/// Runs the signature sign command.
pub async fn sign(
    store: &Store,
    path: &str,
    passphrase: &str,
    wallet_passphrase: &str,
    data: &str,
    domain_hex: Option<&str>,
    out: &mut Output,
) -> Result<Signature, CliError> {
    let object = data_root(data)?;
    let domain = domain(domain_hex)?;

    let mut account = account_from_path(store, path, wallet_passphrase)?;
    unlock_account(&mut account, passphrase)?;

    let root = generate_signing_root(&object, domain, out);
    let signature = sign_root(&account, &root)?;
    debug!("Signed data with {}", account.name());
    Ok(signature)
}

/// Runs the signature verify command. The signer is `signer` if given,
/// otherwise the account at `path`.
#[allow(clippy::too_many_arguments)]
pub async fn verify(
    store: &Store,
    path: &str,
    wallet_passphrase: &str,
    data: &str,
    domain_hex: Option<&str>,
    signature: &str,
    signer: Option<&str>,
    out: &mut Output,
) -> Result<(), CliError> {
    let object = data_root(data)?;
    let domain = domain(domain_hex)?;
    let signature = Signature::from_hex(signature).map_err(|e| CliError::InvalidFlag {
        flag: "signature",
        message: e.to_string(),
    })?;

    let public_key = match signer {
        Some(signer) => PublicKey::from_hex(signer).map_err(|e| CliError::InvalidFlag {
            flag: "signer",
            message: e.to_string(),
        })?,
        None => {
            if path.is_empty() {
                return Err(CliError::MissingFlag("account"));
            }
            *account_from_path(store, path, wallet_passphrase)?.public_key()
        }
    };

    let root = generate_signing_root(&object, domain, out);
    if !public_key.verify(&root, &signature) {
        return Err(CliError::NotVerified);
    }
    Ok(())
}
