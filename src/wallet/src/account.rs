//! Accounts: a single signing identity inside a wallet.

use crate::errors::WalletError;
use crate::keystore::Crypto;
use ethdo_core::{PublicKey, SecretKey, Signature};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Keystore format version written for new accounts.
const ACCOUNT_VERSION: u32 = 4;

/// A signing identity with a public key and lock state.
///
/// The secret key is only held in memory between `unlock` and `lock`; the
/// stored form carries it encrypted under the account passphrase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    uuid: Uuid,
    name: String,
    pubkey: PublicKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crypto: Option<Crypto>,
    version: u32,
    #[serde(skip)]
    secret: Option<SecretKey>,
}

impl Account {
    /// Creates a locked account whose secret is encrypted under `passphrase`.
    pub(crate) fn create(
        name: &str,
        secret: &SecretKey,
        path: Option<String>,
        passphrase: &[u8],
        rounds: u32,
    ) -> Result<Self, WalletError> {
        let crypto = Crypto::encrypt(&secret.to_bytes()[..], passphrase, rounds)?;
        Ok(Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            pubkey: secret.public_key(),
            path,
            crypto: Some(crypto),
            version: ACCOUNT_VERSION,
            secret: None,
        })
    }

    /// Creates an unlocked, unstored account for a derivation path.
    pub(crate) fn derived(path: &str, secret: SecretKey) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: path.to_string(),
            pubkey: secret.public_key(),
            path: Some(path.to_string()),
            crypto: None,
            version: ACCOUNT_VERSION,
            secret: Some(secret),
        }
    }

    /// Gets the account ID.
    pub fn id(&self) -> Uuid {
        self.uuid
    }

    /// Gets the account name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.pubkey
    }

    /// Gets the derivation path, for accounts in hierarchical deterministic wallets.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Whether the secret key is available.
    pub fn is_unlocked(&self) -> bool {
        self.secret.is_some()
    }

    /// Decrypts the secret key with the account passphrase.
    pub fn unlock(&mut self, passphrase: &[u8]) -> Result<(), WalletError> {
        if self.secret.is_some() {
            return Ok(());
        }
        let crypto = self.crypto.as_ref().ok_or(WalletError::AccountLocked)?;
        let bytes = crypto.decrypt(passphrase)?;
        let secret = SecretKey::from_bytes(&bytes)?;
        if secret.public_key() != self.pubkey {
            return Err(WalletError::UnsupportedKeystore(format!(
                "secret key does not match public key for account {}",
                self.name
            )));
        }
        debug!("Unlocked account {}", self.name);
        self.secret = Some(secret);
        Ok(())
    }

    /// Drops the secret key from memory. Accounts without a stored keystore
    /// stay unlocked because there is no way to unlock them again.
    pub fn lock(&mut self) {
        if self.crypto.is_some() {
            self.secret = None;
        }
    }

    /// Gets the secret key of an unlocked account.
    pub fn secret_key(&self) -> Result<&SecretKey, WalletError> {
        self.secret.as_ref().ok_or(WalletError::AccountLocked)
    }

    /// Signs `data` with the account's secret key.
    pub fn sign(&self, data: &[u8]) -> Result<Signature, WalletError> {
        Ok(self.secret_key()?.sign(data))
    }
}
