//! Wallet store for ethdo.
//!
//! Wallets hold accounts; accounts hold encrypted BLS secret keys. Wallets are
//! either non-deterministic (independent random keys) or hierarchical
//! deterministic (keys derived from one seed), and live in a filesystem
//! store that can itself be encrypted with a store passphrase.

pub mod account;
pub mod errors;
pub mod keystore;
pub mod store;
pub mod wallet;

// Re-export commonly used types
pub use account::Account;
pub use errors::WalletError;
pub use store::{Store, FILESYSTEM_STORE};
pub use wallet::{UnlockedWallet, Wallet, WalletKind};
