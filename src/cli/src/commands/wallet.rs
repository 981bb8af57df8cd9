//! Wallet commands.

use crate::accounts::wallet_from_path;
use crate::errors::CliError;
use ethdo_wallet::{Account, Store, Wallet, WalletError, WalletKind};
use tracing::{debug, info};

/// Runs the wallet create command, returning the wallet and any mnemonic
/// generated for it.
pub async fn create(
    store: &Store,
    name: &str,
    kind: &str,
    wallet_passphrase: &str,
    mnemonic: Option<&str>,
) -> Result<(Wallet, Option<String>), CliError> {
    let kind: WalletKind = kind.parse()?;
    if kind == WalletKind::HierarchicalDeterministic && wallet_passphrase.is_empty() {
        return Err(CliError::MissingFlag("walletpassphrase"));
    }

    let (wallet, generated) =
        store.create_wallet(name, kind, wallet_passphrase.as_bytes(), mnemonic)?;
    info!("Created wallet {} ({})", wallet.name(), wallet.id());
    Ok((wallet, generated))
}

/// Runs the wallet list command.
pub async fn list(store: &Store) -> Result<Vec<Wallet>, CliError> {
    store.wallets().map_err(|e| match e {
        WalletError::DecryptFailed => CliError::IncorrectStorePassphrase,
        other => CliError::Wallet(other),
    })
}

/// Runs the wallet info command.
pub async fn info(store: &Store, name: &str) -> Result<Wallet, CliError> {
    wallet_from_path(store, name)
}

/// Runs the wallet accounts command, returning accounts sorted by name.
pub async fn accounts(store: &Store, name: &str) -> Result<Vec<Account>, CliError> {
    let wallet = wallet_from_path(store, name)?;
    let mut accounts: Vec<Account> = wallet.accounts().cloned().collect();
    accounts.sort_by(|a, b| a.name().cmp(b.name()));
    debug!("Wallet {} has {} accounts", name, accounts.len());
    Ok(accounts)
}

/// Runs the wallet delete command.
pub async fn delete(store: &Store, name: &str) -> Result<(), CliError> {
    // Opening first reports a wrong store passphrase as such.
    let wallet = wallet_from_path(store, name)?;
    store.delete_wallet(wallet.name())?;
    Ok(())
}
