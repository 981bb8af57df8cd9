//! Signing roots and signatures.

use crate::errors::CliError;
use crate::output::Output;
use ethdo_core::serde_utils::encode_hex;
use ethdo_core::{compute_signing_root, hash_tree_root, Domain, Root, Signature, TreeHash};
use ethdo_wallet::Account;

/// Computes the root that is signed for `object` in `domain`.
pub fn generate_signing_root<T: TreeHash>(object: &T, domain: Domain, out: &mut Output) -> Root {
    let root = compute_signing_root(hash_tree_root(object), domain);
    out.debug(format!("Signing root is {}", encode_hex(&root)));
    root
}

/// Signs `data` with an unlocked account. The data should, but need not, be
/// a signing root.
pub fn sign(account: &Account, data: &[u8]) -> Result<Signature, CliError> {
    if !account.is_unlocked() {
        return Err(CliError::AccountLocked);
    }
    Ok(account.sign(data)?)
}
