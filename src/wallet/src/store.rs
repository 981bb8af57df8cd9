//! Filesystem wallet store.
//!
//! Layout under the base directory:
//!
//! ```text
//! <base>/<wallet-uuid>/<wallet-uuid>    wallet record
//! <base>/<wallet-uuid>/<account-uuid>   account records
//! ```
//!
//! With a store passphrase every record is wrapped in an encrypted keystore
//! envelope before it is written.

use crate::account::Account;
use crate::errors::WalletError;
use crate::keystore::{Crypto, DEFAULT_PBKDF2_ROUNDS};
use crate::wallet::{Wallet, WalletKind};
use bip39::Mnemonic;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Name of the only store type this crate provides.
pub const FILESYSTEM_STORE: &str = "filesystem";

/// Suffix for records being written, renamed into place once complete.
const TEMP_SUFFIX: &str = ".tmp";

/// Default location of the store: `<config dir>/ethereum2/wallets`.
pub fn default_base_dir() -> PathBuf {
    let mut dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.push("ethereum2");
    dir.push("wallets");
    dir
}

/// Writes `bytes` to `temp_path` and renames it over `path`, so a crash
/// never leaves a truncated record behind.
fn write_file_via_temporary(path: &Path, temp_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(temp_path, bytes)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp_path, fs::Permissions::from_mode(0o600))?;
    }
    fs::rename(temp_path, path)
}

/// A wallet store rooted at a directory.
pub struct Store {
    base_dir: PathBuf,
    passphrase: Option<Zeroizing<Vec<u8>>>,
    kdf_rounds: u32,
}

impl Store {
    /// Opens the store called `kind`. Only the filesystem store exists.
    pub fn open(
        kind: &str,
        base_dir: Option<PathBuf>,
        passphrase: &[u8],
    ) -> Result<Self, WalletError> {
        if kind != FILESYSTEM_STORE {
            return Err(WalletError::UnsupportedStore(kind.to_string()));
        }
        Ok(Self::filesystem(
            base_dir.unwrap_or_else(default_base_dir),
            passphrase,
        ))
    }

    /// Creates a filesystem store. An empty passphrase leaves records unencrypted.
    pub fn filesystem<P: Into<PathBuf>>(base_dir: P, passphrase: &[u8]) -> Self {
        let passphrase = if passphrase.is_empty() {
            None
        } else {
            Some(Zeroizing::new(passphrase.to_vec()))
        };
        Self {
            base_dir: base_dir.into(),
            passphrase,
            kdf_rounds: DEFAULT_PBKDF2_ROUNDS,
        }
    }

    /// Sets the PBKDF2 iteration count for records and keys this store writes.
    pub fn with_kdf_rounds(mut self, rounds: u32) -> Self {
        self.kdf_rounds = rounds;
        self
    }

    /// Gets the PBKDF2 iteration count for new keystores.
    pub fn kdf_rounds(&self) -> u32 {
        self.kdf_rounds
    }

    /// Gets the base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Creates a wallet.
    ///
    /// Hierarchical deterministic wallets need a passphrase to protect their
    /// seed; the seed comes from `mnemonic` if supplied, otherwise from a
    /// freshly generated 24-word mnemonic which is returned to the caller.
    pub fn create_wallet(
        &self,
        name: &str,
        kind: WalletKind,
        passphrase: &[u8],
        mnemonic: Option<&str>,
    ) -> Result<(Wallet, Option<String>), WalletError> {
        if name.is_empty() {
            return Err(WalletError::InvalidName("wallet name missing".to_string()));
        }
        if name.contains('/') {
            return Err(WalletError::InvalidName(format!(
                "wallet name {:?} contains '/'",
                name
            )));
        }
        if self.find_wallet_dir(name)?.is_some() {
            return Err(WalletError::WalletExists(name.to_string()));
        }

        let (wallet, generated) = match kind {
            WalletKind::NonDeterministic => (Wallet::new_non_deterministic(name), None),
            WalletKind::HierarchicalDeterministic => {
                if passphrase.is_empty() {
                    return Err(WalletError::InvalidName(
                        "wallet passphrase is required".to_string(),
                    ));
                }
                let (mnemonic, generated) = match mnemonic {
                    Some(phrase) => (
                        Mnemonic::parse(phrase)
                            .map_err(|e| WalletError::MnemonicError(e.to_string()))?,
                        false,
                    ),
                    None => {
                        let mut entropy = Zeroizing::new([0u8; 32]);
                        rand::thread_rng().fill_bytes(&mut entropy[..]);
                        (
                            Mnemonic::from_entropy(&entropy[..])
                                .map_err(|e| WalletError::MnemonicError(e.to_string()))?,
                            true,
                        )
                    }
                };
                let seed = Zeroizing::new(mnemonic.to_seed(""));
                let wallet =
                    Wallet::new_hierarchical(name, &seed[..], passphrase, self.kdf_rounds)?;
                (wallet, generated.then(|| mnemonic.to_string()))
            }
        };

        fs::create_dir_all(self.wallet_dir(&wallet))?;
        self.store_wallet(&wallet)?;
        info!("Created {} wallet {}", kind, name);
        Ok((wallet, generated))
    }

    /// Lists every wallet, sorted by name, with accounts loaded.
    pub fn wallets(&self) -> Result<Vec<Wallet>, WalletError> {
        let mut wallets = Vec::new();
        for (dir, mut wallet) in self.wallet_records()? {
            wallet.set_accounts(self.load_accounts(&dir, wallet.id())?);
            wallets.push(wallet);
        }
        wallets.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(wallets)
    }

    /// Opens the wallet called `name`, with accounts loaded.
    pub fn open_wallet(&self, name: &str) -> Result<Wallet, WalletError> {
        let (dir, mut wallet) = self
            .wallet_records()?
            .into_iter()
            .find(|(_, wallet)| wallet.name() == name)
            .ok_or_else(|| WalletError::WalletNotFound(name.to_string()))?;
        wallet.set_accounts(self.load_accounts(&dir, wallet.id())?);
        debug!("Opened wallet {} from {}", name, dir.display());
        Ok(wallet)
    }

    /// Deletes the wallet called `name` and all of its accounts.
    pub fn delete_wallet(&self, name: &str) -> Result<(), WalletError> {
        let dir = self
            .find_wallet_dir(name)?
            .ok_or_else(|| WalletError::WalletNotFound(name.to_string()))?;
        fs::remove_dir_all(&dir)?;
        info!("Deleted wallet {}", name);
        Ok(())
    }

    pub(crate) fn store_wallet(&self, wallet: &Wallet) -> Result<(), WalletError> {
        let path = self.wallet_dir(wallet).join(wallet.id().to_string());
        self.write_record(&path, wallet)
    }

    pub(crate) fn store_account(&self, wallet: &Wallet, account: &Account) -> Result<(), WalletError> {
        let path = self.wallet_dir(wallet).join(account.id().to_string());
        self.write_record(&path, account)
    }

    fn wallet_dir(&self, wallet: &Wallet) -> PathBuf {
        self.base_dir.join(wallet.id().to_string())
    }

    fn find_wallet_dir(&self, name: &str) -> Result<Option<PathBuf>, WalletError> {
        Ok(self
            .wallet_records()?
            .into_iter()
            .find(|(_, wallet)| wallet.name() == name)
            .map(|(dir, _)| dir))
    }

    /// Reads the wallet record of every wallet directory.
    fn wallet_records(&self) -> Result<Vec<(PathBuf, Wallet)>, WalletError> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let file_name = entry.file_name();
            let id = match file_name.to_str().and_then(|s| Uuid::parse_str(s).ok()) {
                Some(id) => id,
                None => continue,
            };
            let record = entry.path().join(id.to_string());
            if !record.is_file() {
                continue;
            }
            let wallet: Wallet = self.read_record(&record)?;
            records.push((entry.path(), wallet));
        }
        Ok(records)
    }

    fn load_accounts(&self, dir: &Path, wallet_id: Uuid) -> Result<Vec<Account>, WalletError> {
        let mut accounts = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            match file_name.to_str().and_then(|s| Uuid::parse_str(s).ok()) {
                Some(id) if id != wallet_id => {}
                _ => continue,
            }
            accounts.push(self.read_record::<Account>(&entry.path())?);
        }
        accounts.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(accounts)
    }

    fn read_record<T: DeserializeOwned>(&self, path: &Path) -> Result<T, WalletError> {
        let data = fs::read(path)?;
        match &self.passphrase {
            Some(passphrase) => {
                let crypto: Crypto =
                    serde_json::from_slice(&data).map_err(|_| WalletError::DecryptFailed)?;
                let plaintext = crypto.decrypt(passphrase).map_err(|e| match e {
                    WalletError::InvalidPassphrase => WalletError::DecryptFailed,
                    other => other,
                })?;
                Ok(serde_json::from_slice(&plaintext)?)
            }
            None => {
                if serde_json::from_slice::<Crypto>(&data).is_ok() {
                    return Err(WalletError::DecryptFailed);
                }
                Ok(serde_json::from_slice(&data)?)
            }
        }
    }

    fn write_record<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), WalletError> {
        let plaintext = Zeroizing::new(serde_json::to_vec_pretty(value)?);
        let bytes = match &self.passphrase {
            Some(passphrase) => {
                let crypto = Crypto::encrypt(&plaintext, passphrase, self.kdf_rounds)?;
                serde_json::to_vec_pretty(&crypto)?
            }
            None => plaintext.to_vec(),
        };

        let mut temp = path.as_os_str().to_owned();
        temp.push(TEMP_SUFFIX);
        write_file_via_temporary(path, Path::new(&temp), &bytes)?;
        Ok(())
    }
}
