//! Account commands.

use crate::accounts::{account_from_path, unlock_account, wallet_from_path};
use crate::errors::CliError;
use crate::path::wallet_and_account_names;
use ethdo_core::serde_utils::encode_hex;
use ethdo_wallet::{Account, Store, WalletKind};
use tracing::info;

/// Runs the account create command.
pub async fn create(
    store: &Store,
    path: &str,
    passphrase: &str,
    wallet_passphrase: &str,
) -> Result<Account, CliError> {
    let mut wallet = wallet_from_path(store, path)?;
    let (_, account_name) = wallet_and_account_names(path)?;
    if account_name.is_empty() {
        return Err(CliError::NoAccountName);
    }
    if passphrase.is_empty() {
        return Err(CliError::MissingFlag("passphrase"));
    }

    let account = match wallet.kind() {
        WalletKind::NonDeterministic => {
            wallet.create_account(store, account_name, passphrase.as_bytes())?
        }
        WalletKind::HierarchicalDeterministic => {
            let mut unlocked = wallet
                .unlock_scoped(wallet_passphrase.as_bytes())
                .map_err(|_| CliError::InvalidWalletPassphrase)?;
            unlocked.create_account(store, account_name, passphrase.as_bytes())?
        }
    };
    info!("Created account {}", path);
    Ok(account)
}

/// Runs the account info command.
pub async fn info(store: &Store, path: &str, wallet_passphrase: &str) -> Result<Account, CliError> {
    account_from_path(store, path, wallet_passphrase)
}

/// Runs the account key command, returning the secret key as hex.
pub async fn key(
    store: &Store,
    path: &str,
    passphrase: &str,
    wallet_passphrase: &str,
) -> Result<String, CliError> {
    let mut account = account_from_path(store, path, wallet_passphrase)?;
    if !account.is_unlocked() && passphrase.is_empty() {
        return Err(CliError::MissingFlag("passphrase"));
    }
    unlock_account(&mut account, passphrase)?;
    let secret = account.secret_key()?.to_bytes();
    Ok(encode_hex(&secret[..]))
}
