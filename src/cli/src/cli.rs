//! Command line arguments.

use std::path::PathBuf;
use structopt::StructOpt;

/// Command line arguments for ethdo.
#[derive(Debug, StructOpt)]
#[structopt(name = "ethdo", about = "Manage common Ethereum consensus tasks from the command line")]
pub struct Opt {
    #[structopt(flatten)]
    pub flags: GlobalFlags,

    /// Subcommand to run
    #[structopt(subcommand)]
    pub cmd: Command,
}

/// Flags accepted by every command.
///
/// Values left unset here fall back to `ETHDO_*` environment variables, then
/// the configuration file, then built-in defaults.
#[derive(Debug, Default, StructOpt)]
pub struct GlobalFlags {
    /// Config file (default is $HOME/.ethdo.yaml)
    #[structopt(long, global = true, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// Log transactions to the named file (default $HOME/ethdo.log)
    #[structopt(long, global = true, parse(from_os_str))]
    pub log: Option<PathBuf>,

    /// Store for accounts
    #[structopt(long, global = true)]
    pub store: Option<String>,

    /// Base directory of the filesystem store
    #[structopt(long, global = true, parse(from_os_str))]
    pub basedir: Option<PathBuf>,

    /// Account name (in format "wallet/account")
    #[structopt(long, global = true)]
    pub account: Option<String>,

    /// Passphrase for store (if applicable)
    #[structopt(long, global = true)]
    pub storepassphrase: Option<String>,

    /// Passphrase for wallet (if applicable)
    #[structopt(long, global = true)]
    pub walletpassphrase: Option<String>,

    /// Passphrase for account (if applicable)
    #[structopt(long, global = true)]
    pub passphrase: Option<String>,

    /// Do not generate any output
    #[structopt(long, global = true)]
    pub quiet: bool,

    /// Generate additional output where appropriate
    #[structopt(long, global = true)]
    pub verbose: bool,

    /// Generate debug output
    #[structopt(long, global = true)]
    pub debug: bool,

    /// Connection to the beacon node's REST API
    #[structopt(long, global = true)]
    pub connection: Option<String>,

    /// Time after which a network request is considered failed, e.g. 10s
    #[structopt(long, global = true)]
    pub timeout: Option<String>,
}

/// Flags for commands that produce a transaction.
#[derive(Clone, Copy, Debug, Default, StructOpt)]
pub struct TransactionFlags {
    /// Do not send the transaction; generate and output it only
    #[structopt(long)]
    pub generate: bool,

    /// Wait for the transaction to take effect before returning
    #[structopt(long)]
    pub wait: bool,
}

/// Subcommands for ethdo.
#[derive(Debug, StructOpt)]
pub enum Command {
    /// Show the version of ethdo
    #[structopt(name = "version")]
    Version,

    /// Manage wallets
    #[structopt(name = "wallet")]
    Wallet(WalletCommand),

    /// Manage accounts
    #[structopt(name = "account")]
    Account(AccountCommand),

    /// Sign and verify data
    #[structopt(name = "signature")]
    Signature(SignatureCommand),

    /// Obtain information about the chain
    #[structopt(name = "chain")]
    Chain(ChainCommand),

    /// Obtain information about the beacon node
    #[structopt(name = "node")]
    Node(NodeCommand),

    /// Manage validators
    #[structopt(name = "validator")]
    Validator(ValidatorCommand),
}

#[derive(Debug, StructOpt)]
pub enum WalletCommand {
    /// Create a wallet
    #[structopt(name = "create")]
    Create {
        /// Name of the wallet
        #[structopt(long)]
        wallet: String,

        /// Type of wallet: nd (non-deterministic) or hd (hierarchical deterministic)
        #[structopt(long = "type", default_value = "nd")]
        kind: String,

        /// Mnemonic to seed a hierarchical deterministic wallet
        #[structopt(long)]
        mnemonic: Option<String>,
    },

    /// List wallets
    #[structopt(name = "list")]
    List,

    /// Show information about a wallet
    #[structopt(name = "info")]
    Info {
        /// Name of the wallet
        #[structopt(long)]
        wallet: String,
    },

    /// List the accounts in a wallet
    #[structopt(name = "accounts")]
    Accounts {
        /// Name of the wallet
        #[structopt(long)]
        wallet: String,
    },

    /// Delete a wallet and all of its accounts
    #[structopt(name = "delete")]
    Delete {
        /// Name of the wallet
        #[structopt(long)]
        wallet: String,
    },
}

#[derive(Debug, StructOpt)]
pub enum AccountCommand {
    /// Create an account
    #[structopt(name = "create")]
    Create,

    /// Show information about an account
    #[structopt(name = "info")]
    Info,

    /// Show the secret key of an account
    #[structopt(name = "key")]
    Key,
}

#[derive(Debug, StructOpt)]
pub enum SignatureCommand {
    /// Sign data with an account
    #[structopt(name = "sign")]
    Sign {
        /// Data to sign, as hex
        #[structopt(long)]
        data: String,

        /// Domain in which to sign, as hex (default all zeros)
        #[structopt(long)]
        domain: Option<String>,
    },

    /// Verify a signature
    #[structopt(name = "verify")]
    Verify {
        /// Data that was signed, as hex
        #[structopt(long)]
        data: String,

        /// Domain in which the data was signed, as hex (default all zeros)
        #[structopt(long)]
        domain: Option<String>,

        /// The signature, as hex
        #[structopt(long)]
        signature: String,

        /// Public key of the signer, as hex (default the --account key)
        #[structopt(long)]
        signer: Option<String>,
    },
}

#[derive(Debug, StructOpt)]
pub enum ChainCommand {
    /// Show genesis and configuration of the chain
    #[structopt(name = "info")]
    Info,

    /// Show the current slot and epoch of the chain
    #[structopt(name = "status")]
    Status,
}

#[derive(Debug, StructOpt)]
pub enum NodeCommand {
    /// Show the version and sync state of the node
    #[structopt(name = "info")]
    Info,
}

#[derive(Debug, StructOpt)]
pub enum ValidatorCommand {
    /// Show index, status and balance of a validator
    #[structopt(name = "info")]
    Info,

    /// Exit a validator from the active set
    #[structopt(name = "exit")]
    Exit {
        /// Epoch at which to exit (default current epoch)
        #[structopt(long)]
        epoch: Option<u64>,

        #[structopt(flatten)]
        tx: TransactionFlags,
    },
}

impl Command {
    /// Transaction flags, for commands that take them.
    pub fn transaction_flags(&self) -> Option<TransactionFlags> {
        match self {
            Command::Validator(ValidatorCommand::Exit { tx, .. }) => Some(*tx),
            _ => None,
        }
    }
}
