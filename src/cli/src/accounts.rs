//! Resolving account path specifiers to wallets and accounts.

use crate::errors::CliError;
use crate::path::wallet_and_account_names;
use ethdo_wallet::{Account, Store, Wallet, WalletError, WalletKind};
use regex::Regex;
use tracing::debug;

/// Opens the wallet named by `path`.
pub fn wallet_from_path(store: &Store, path: &str) -> Result<Wallet, CliError> {
    let (wallet_name, _) = wallet_and_account_names(path)?;
    store.open_wallet(wallet_name).map_err(|e| match e {
        WalletError::DecryptFailed => CliError::IncorrectStorePassphrase,
        other => CliError::Wallet(other),
    })
}

/// Finds the account called `name` in `wallet`.
///
/// A derivation path in a hierarchical deterministic wallet needs the wallet
/// unlocked; it is unlocked with `wallet_passphrase` for this lookup only.
pub fn account_in_wallet(
    wallet: &mut Wallet,
    name: &str,
    wallet_passphrase: &str,
) -> Result<Account, CliError> {
    if name.is_empty() {
        return Err(CliError::NoAccountName);
    }

    if wallet.kind() == WalletKind::HierarchicalDeterministic
        && name.starts_with("m/")
        && !wallet_passphrase.is_empty()
    {
        let unlocked = wallet
            .unlock_scoped(wallet_passphrase.as_bytes())
            .map_err(|_| CliError::InvalidWalletPassphrase)?;
        return Ok(unlocked.account_by_name(name)?);
    }
    Ok(wallet.account_by_name(name)?)
}

/// Obtains the single account named by `path`.
pub fn account_from_path(
    store: &Store,
    path: &str,
    wallet_passphrase: &str,
) -> Result<Account, CliError> {
    let mut wallet = wallet_from_path(store, path)?;
    let (_, account_name) = wallet_and_account_names(path)?;
    account_in_wallet(&mut wallet, account_name, wallet_passphrase)
}

/// Unlocks `account` with its passphrase. Accounts derived on the fly are
/// already unlocked.
pub fn unlock_account(account: &mut Account, passphrase: &str) -> Result<(), CliError> {
    if account.is_unlocked() {
        return Ok(());
    }
    account.unlock(passphrase.as_bytes()).map_err(|e| match e {
        WalletError::InvalidPassphrase | WalletError::AccountLocked => {
            CliError::InvalidAccountPassphrase
        }
        other => CliError::Wallet(other),
    })
}

/// Obtains every account matched by `path`, sorted by name.
///
/// The account part is first tried as an exact name. Failing that it is a
/// regular expression anchored at both ends; an empty account part matches
/// every account in the wallet.
pub fn accounts_from_path(
    store: &Store,
    path: &str,
    wallet_passphrase: &str,
) -> Result<Vec<Account>, CliError> {
    if let Ok(account) = account_from_path(store, path, wallet_passphrase) {
        return Ok(vec![account]);
    }

    let wallet = wallet_from_path(store, path)?;
    let (_, account_spec) = wallet_and_account_names(path)?;
    let pattern = if account_spec.is_empty() {
        "^.*$".to_string()
    } else {
        format!("^{}$", account_spec)
    };
    let re = Regex::new(&pattern).map_err(|source| CliError::InvalidPattern {
        pattern: account_spec.to_string(),
        source,
    })?;

    let mut accounts: Vec<Account> = wallet
        .accounts()
        .filter(|account| re.is_match(account.name()))
        .cloned()
        .collect();
    accounts.sort_by(|a, b| a.name().cmp(b.name()));
    debug!("{} accounts match {}", accounts.len(), path);
    Ok(accounts)
}
