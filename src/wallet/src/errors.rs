//! Error types for the wallet store.

use ethdo_core::CoreError;
use thiserror::Error;

/// Errors that can occur in the wallet store.
#[derive(Error, Debug)]
pub enum WalletError {
    /// Error when a file operation fails.
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error when a key operation fails.
    #[error("Key error: {0}")]
    KeyError(#[from] CoreError),

    /// Error when a mnemonic cannot be parsed.
    #[error("Mnemonic error: {0}")]
    MnemonicError(String),

    /// Error when a stored record cannot be decrypted with the store passphrase.
    #[error("failed to decrypt wallet")]
    DecryptFailed,

    /// Error when a keystore passphrase does not match.
    #[error("invalid passphrase")]
    InvalidPassphrase,

    /// Error when a keystore uses parameters this store cannot handle.
    #[error("Unsupported keystore: {0}")]
    UnsupportedKeystore(String),

    /// Error when the requested store type is unknown.
    #[error("Unsupported store: {0}")]
    UnsupportedStore(String),

    /// Error when the requested wallet type is unknown.
    #[error("Unknown wallet type: {0}")]
    UnknownWalletType(String),

    /// Error when no wallet has the given name.
    #[error("wallet not found: {0}")]
    WalletNotFound(String),

    /// Error when a wallet with the given name already exists.
    #[error("wallet already exists: {0}")]
    WalletExists(String),

    /// Error when no account has the given name.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// Error when an account with the given name already exists.
    #[error("account already exists: {0}")]
    AccountExists(String),

    /// Error when a wallet or account name is not acceptable.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Error when an operation needs an unlocked wallet.
    #[error("wallet must be unlocked")]
    WalletLocked,

    /// Error when an operation needs an unlocked account.
    #[error("account must be unlocked")]
    AccountLocked,
}
