//! Wallet implementation for ethdo.

use crate::account::Account;
use crate::errors::WalletError;
use crate::keystore::Crypto;
use crate::store::Store;
use ethdo_core::derivation::{derive_path, validator_signing_path};
use ethdo_core::SecretKey;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Wallet format version written for new wallets.
const WALLET_VERSION: u32 = 1;

/// How a wallet's accounts get their keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletKind {
    /// Every account has an independent random key.
    #[serde(rename = "non-deterministic")]
    NonDeterministic,
    /// Accounts are derived from a single seed along a path.
    #[serde(rename = "hierarchical deterministic")]
    HierarchicalDeterministic,
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletKind::NonDeterministic => f.write_str("non-deterministic"),
            WalletKind::HierarchicalDeterministic => f.write_str("hierarchical deterministic"),
        }
    }
}

impl FromStr for WalletKind {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nd" | "non-deterministic" => Ok(WalletKind::NonDeterministic),
            "hd" | "hierarchical deterministic" => Ok(WalletKind::HierarchicalDeterministic),
            other => Err(WalletError::UnknownWalletType(other.to_string())),
        }
    }
}

/// A named container of accounts.
#[derive(Serialize, Deserialize)]
pub struct Wallet {
    uuid: Uuid,
    name: String,
    #[serde(rename = "type")]
    kind: WalletKind,
    version: u32,
    #[serde(rename = "nextaccount", default)]
    next_account: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crypto: Option<Crypto>,
    #[serde(skip)]
    seed: Option<Zeroizing<Vec<u8>>>,
    #[serde(skip)]
    accounts: Vec<Account>,
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("uuid", &self.uuid)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("next_account", &self.next_account)
            .field("unlocked", &self.seed.is_some())
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

/// Checks a new account name against the wallet's existing accounts.
fn check_account_name(wallet: &Wallet, name: &str) -> Result<(), WalletError> {
    if name.is_empty() {
        return Err(WalletError::InvalidName("account name missing".to_string()));
    }
    if name.starts_with("m/") {
        return Err(WalletError::InvalidName(format!(
            "account name {:?} looks like a derivation path",
            name
        )));
    }
    if name.contains('/') {
        return Err(WalletError::InvalidName(format!(
            "account name {:?} contains '/'",
            name
        )));
    }
    if wallet.accounts.iter().any(|a| a.name() == name) {
        return Err(WalletError::AccountExists(name.to_string()));
    }
    Ok(())
}

impl Wallet {
    /// Creates a non-deterministic wallet.
    pub(crate) fn new_non_deterministic(name: &str) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            kind: WalletKind::NonDeterministic,
            version: WALLET_VERSION,
            next_account: 0,
            crypto: None,
            seed: None,
            accounts: Vec::new(),
        }
    }

    /// Creates a hierarchical deterministic wallet holding `seed` encrypted
    /// under `passphrase`. The wallet starts locked.
    pub(crate) fn new_hierarchical(
        name: &str,
        seed: &[u8],
        passphrase: &[u8],
        rounds: u32,
    ) -> Result<Self, WalletError> {
        Ok(Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            kind: WalletKind::HierarchicalDeterministic,
            version: WALLET_VERSION,
            next_account: 0,
            crypto: Some(Crypto::encrypt(seed, passphrase, rounds)?),
            seed: None,
            accounts: Vec::new(),
        })
    }

    /// Gets the wallet ID.
    pub fn id(&self) -> Uuid {
        self.uuid
    }

    /// Gets the wallet name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the wallet type.
    pub fn kind(&self) -> WalletKind {
        self.kind
    }

    /// Gets the index the next derived account will use.
    pub fn next_account(&self) -> u64 {
        self.next_account
    }

    /// Whether the wallet can create or derive accounts right now.
    /// Non-deterministic wallets need no unlocking.
    pub fn is_unlocked(&self) -> bool {
        match self.kind {
            WalletKind::NonDeterministic => true,
            WalletKind::HierarchicalDeterministic => self.seed.is_some(),
        }
    }

    /// Unlocks the wallet with its passphrase.
    pub fn unlock(&mut self, passphrase: &[u8]) -> Result<(), WalletError> {
        let crypto = match &self.crypto {
            Some(crypto) => crypto,
            None => return Ok(()),
        };
        let seed = crypto.decrypt(passphrase)?;
        debug!("Unlocked wallet {}", self.name);
        self.seed = Some(seed);
        Ok(())
    }

    /// Locks the wallet, dropping any decrypted seed.
    pub fn lock(&mut self) {
        if self.seed.take().is_some() {
            debug!("Locked wallet {}", self.name);
        }
    }

    /// Unlocks the wallet until the returned guard is dropped.
    pub fn unlock_scoped(&mut self, passphrase: &[u8]) -> Result<UnlockedWallet<'_>, WalletError> {
        self.unlock(passphrase)?;
        Ok(UnlockedWallet { wallet: self })
    }

    /// Iterates over the stored accounts.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub(crate) fn set_accounts(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
    }

    /// Finds an account by name.
    ///
    /// In a hierarchical deterministic wallet a name starting with `m/` is a
    /// derivation path: a stored account at that path wins, otherwise an
    /// unlocked wallet derives the account on the fly.
    pub fn account_by_name(&self, name: &str) -> Result<Account, WalletError> {
        if let Some(account) = self.accounts.iter().find(|a| a.name() == name) {
            return Ok(account.clone());
        }

        if self.kind == WalletKind::HierarchicalDeterministic && name.starts_with("m/") {
            if let Some(account) = self.accounts.iter().find(|a| a.path() == Some(name)) {
                return Ok(account.clone());
            }
            if let Some(seed) = &self.seed {
                let secret = derive_path(seed, name)?;
                return Ok(Account::derived(name, secret));
            }
        }

        Err(WalletError::AccountNotFound(name.to_string()))
    }

    /// Creates and stores a new account protected by `passphrase`.
    pub fn create_account(
        &mut self,
        store: &Store,
        name: &str,
        passphrase: &[u8],
    ) -> Result<Account, WalletError> {
        check_account_name(self, name)?;
        if passphrase.is_empty() {
            return Err(WalletError::InvalidName(
                "account passphrase is required".to_string(),
            ));
        }

        let account = match self.kind {
            WalletKind::NonDeterministic => {
                let mut ikm = Zeroizing::new([0u8; 32]);
                rand::thread_rng().fill_bytes(&mut ikm[..]);
                let secret = SecretKey::from_ikm(&ikm[..])?;
                Account::create(name, &secret, None, passphrase, store.kdf_rounds())?
            }
            WalletKind::HierarchicalDeterministic => {
                let seed = self.seed.as_ref().ok_or(WalletError::WalletLocked)?;
                let index = self.next_account;
                let path = validator_signing_path(index);
                let secret = derive_path(seed, &path)?;
                let account =
                    Account::create(name, &secret, Some(path), passphrase, store.kdf_rounds())?;

                // The advanced index goes to disk before the key, so a failed
                // write can only ever skip an index, never reuse one.
                self.next_account = index + 1;
                if let Err(e) = store.store_wallet(self) {
                    self.next_account = index;
                    return Err(e);
                }
                account
            }
        };

        store.store_account(self, &account)?;
        info!("Created account {}/{}", self.name, name);

        self.accounts.push(account.clone());
        Ok(account)
    }
}

/// A wallet unlocked for the lifetime of this guard; dropping it locks the
/// wallet again whichever way the borrowing scope exits.
pub struct UnlockedWallet<'a> {
    wallet: &'a mut Wallet,
}

impl Deref for UnlockedWallet<'_> {
    type Target = Wallet;

    fn deref(&self) -> &Wallet {
        self.wallet
    }
}

impl DerefMut for UnlockedWallet<'_> {
    fn deref_mut(&mut self) -> &mut Wallet {
        self.wallet
    }
}

impl Drop for UnlockedWallet<'_> {
    fn drop(&mut self) {
        self.wallet.lock();
    }
}
