//! ethdo: manage Ethereum consensus-layer wallets and query beacon nodes.

pub mod accounts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod connection;
pub mod errors;
pub mod output;
pub mod path;
pub mod signing;
pub mod txlog;

// Re-export commonly used types and functions
pub use accounts::{account_from_path, accounts_from_path, wallet_from_path};
pub use cli::{Command, GlobalFlags, Opt, TransactionFlags};
pub use config::Config;
pub use errors::CliError;
pub use output::Output;
pub use path::wallet_and_account_names;
pub use signing::{generate_signing_root, sign};
