//! Error types for the ethdo CLI.

use ethdo_beacon::BeaconError;
use ethdo_core::CoreError;
use ethdo_wallet::WalletError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur running an ethdo command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Two mutually exclusive flags were both set.
    #[error("Cannot supply both {0} and {1} flags")]
    ConflictingFlags(&'static str, &'static str),

    /// The configuration file could not be read or parsed.
    #[error("failed to read config file {}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },

    /// A configuration value has the wrong shape.
    #[error("invalid value {value:?} for {key}: {message}")]
    InvalidConfig {
        key: String,
        value: String,
        message: String,
    },

    /// The home directory is needed but unknown.
    #[error("failed to find home directory")]
    NoHomeDir,

    #[error("invalid account format")]
    InvalidAccountFormat,

    #[error("no account name")]
    NoAccountName,

    #[error("Incorrect store passphrase")]
    IncorrectStorePassphrase,

    #[error("invalid wallet passphrase")]
    InvalidWalletPassphrase,

    #[error("invalid account passphrase")]
    InvalidAccountPassphrase,

    #[error("account must be unlocked to sign")]
    AccountLocked,

    #[error("no connection")]
    NoConnection,

    /// An account pattern is not a valid regular expression.
    #[error("invalid account pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A required flag was not given.
    #[error("--{0} is required")]
    MissingFlag(&'static str),

    /// A flag's value could not be decoded.
    #[error("invalid {flag}: {message}")]
    InvalidFlag { flag: &'static str, message: String },

    /// A signature did not verify.
    #[error("Not verified")]
    NotVerified,

    /// The validator has already had an exit scheduled.
    #[error("validator {0} is already exiting")]
    ValidatorExiting(String),

    /// Waiting for an exit to be scheduled gave up.
    #[error("exit for validator {0} not scheduled after {1} checks")]
    ExitNotScheduled(String, u32),

    /// The validator is not in the active set.
    #[error("validator {0} is not active (status {1})")]
    ValidatorNotActive(String, String),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Beacon(#[from] BeaconError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
