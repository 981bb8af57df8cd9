//! Commands for ethdo.

pub mod account;
pub mod chain;
pub mod node;
pub mod signature;
pub mod validator;
pub mod version;
pub mod wallet;

use crate::accounts::{account_from_path, unlock_account};
use crate::cli::{
    AccountCommand, ChainCommand, Command, NodeCommand, SignatureCommand, ValidatorCommand,
    WalletCommand,
};
use crate::config::Config;
use crate::connection::connect;
use crate::errors::CliError;
use crate::output::Output;
use crate::txlog::{self, TxRecord};
use chrono::{SecondsFormat, Utc};
use ethdo_core::serde_utils::encode_hex;
use ethdo_wallet::{Store, WalletKind};

/// Opens the configured wallet store.
pub fn open_store(config: &Config) -> Result<Store, CliError> {
    Ok(Store::open(
        &config.store,
        config.base_dir.clone(),
        config.store_passphrase.as_bytes(),
    )?)
}

fn account_flag(config: &Config) -> Result<&str, CliError> {
    if config.account.is_empty() {
        return Err(CliError::MissingFlag("account"));
    }
    Ok(&config.account)
}

/// Runs a command that needs configuration, writing its results to `out`.
pub async fn execute(cmd: Command, config: &Config, out: &mut Output) -> Result<(), CliError> {
    match cmd {
        Command::Version => {
            out.line(version::run().await);
        }
        Command::Wallet(cmd) => run_wallet(cmd, config, out).await?,
        Command::Account(cmd) => run_account(cmd, config, out).await?,
        Command::Signature(cmd) => run_signature(cmd, config, out).await?,
        Command::Chain(cmd) => run_chain(cmd, config, out).await?,
        Command::Node(cmd) => run_node(cmd, config, out).await?,
        Command::Validator(cmd) => run_validator(cmd, config, out).await?,
    }
    Ok(())
}

async fn run_wallet(cmd: WalletCommand, config: &Config, out: &mut Output) -> Result<(), CliError> {
    let store = open_store(config)?;
    match cmd {
        WalletCommand::Create {
            wallet: name,
            kind,
            mnemonic,
        } => {
            let (wallet, generated) = wallet::create(
                &store,
                &name,
                &kind,
                &config.wallet_passphrase,
                mnemonic.as_deref(),
            )
            .await?;
            out.verbose_field("UUID", wallet.id());
            if let Some(mnemonic) = generated {
                out.field_always("Mnemonic", mnemonic);
                out.warn("Write down the mnemonic and keep it safe; it cannot be shown again");
            }
        }
        WalletCommand::List => {
            for wallet in wallet::list(&store).await? {
                if out.is_verbose() {
                    out.line(format!("{}: {}", wallet.name(), wallet.id()));
                } else {
                    out.line(wallet.name());
                }
            }
        }
        WalletCommand::Info { wallet: name } => {
            let wallet = wallet::info(&store, &name).await?;
            out.field("Type", wallet.kind());
            out.field("UUID", wallet.id());
            out.field("Accounts", wallet.accounts().count());
            if wallet.kind() == WalletKind::HierarchicalDeterministic {
                out.verbose_field("Next account", wallet.next_account());
            }
        }
        WalletCommand::Accounts { wallet: name } => {
            for account in wallet::accounts(&store, &name).await? {
                if out.is_verbose() {
                    out.line(account.name());
                    out.field("\tPublic key", account.public_key());
                } else {
                    out.line(account.name());
                }
            }
        }
        WalletCommand::Delete { wallet: name } => {
            wallet::delete(&store, &name).await?;
        }
    }
    Ok(())
}

async fn run_account(
    cmd: AccountCommand,
    config: &Config,
    out: &mut Output,
) -> Result<(), CliError> {
    let store = open_store(config)?;
    let path = account_flag(config)?;
    match cmd {
        AccountCommand::Create => {
            let account = account::create(
                &store,
                path,
                &config.passphrase,
                &config.wallet_passphrase,
            )
            .await?;
            out.verbose_field("Public key", account.public_key());
        }
        AccountCommand::Info => {
            let account = account::info(&store, path, &config.wallet_passphrase).await?;
            out.field("Public key", account.public_key());
            out.verbose_field("UUID", account.id());
            if let Some(path) = account.path() {
                out.verbose_field("Path", path);
            }
        }
        AccountCommand::Key => {
            let key = account::key(
                &store,
                path,
                &config.passphrase,
                &config.wallet_passphrase,
            )
            .await?;
            out.line(key);
        }
    }
    Ok(())
}

async fn run_signature(
    cmd: SignatureCommand,
    config: &Config,
    out: &mut Output,
) -> Result<(), CliError> {
    let store = open_store(config)?;
    match cmd {
        SignatureCommand::Sign { data, domain } => {
            let signature = signature::sign(
                &store,
                account_flag(config)?,
                &config.passphrase,
                &config.wallet_passphrase,
                &data,
                domain.as_deref(),
                out,
            )
            .await?;
            out.line(signature.to_string());
        }
        SignatureCommand::Verify {
            data,
            domain,
            signature: sig,
            signer,
        } => {
            signature::verify(
                &store,
                &config.account,
                &config.wallet_passphrase,
                &data,
                domain.as_deref(),
                &sig,
                signer.as_deref(),
                out,
            )
            .await?;
            out.verbose_field("Verified", true);
        }
    }
    Ok(())
}

async fn run_chain(cmd: ChainCommand, config: &Config, out: &mut Output) -> Result<(), CliError> {
    let node = connect(config, out)?;
    match cmd {
        ChainCommand::Info => {
            let info = chain::info(&node).await?;
            out.field(
                "Genesis time",
                info.genesis_time.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
            out.field(
                "Genesis validators root",
                encode_hex(&info.genesis_validators_root),
            );
            if out.is_verbose() {
                for (key, value) in info.config.iter() {
                    out.field(key, value);
                }
            }
        }
        ChainCommand::Status => {
            let status = chain::status(&node, Utc::now()).await?;
            out.field("Current slot", status.slot);
            out.field("Current epoch", status.epoch);
            out.verbose_field(
                "Slot start",
                status.slot_start.to_rfc3339_opts(SecondsFormat::Secs, true),
            );
        }
    }
    Ok(())
}

async fn run_node(cmd: NodeCommand, config: &Config, out: &mut Output) -> Result<(), CliError> {
    let node = connect(config, out)?;
    match cmd {
        NodeCommand::Info => {
            let info = node::info(&node).await?;
            out.field("Version", &info.version.version);
            if !info.version.metadata.is_empty() {
                out.verbose_field("Metadata", &info.version.metadata);
            }
            out.field("Syncing", info.sync.is_syncing);
            out.verbose_field("Head slot", info.sync.head_slot);
            out.verbose_field("Sync distance", info.sync.sync_distance);
        }
    }
    Ok(())
}

async fn run_validator(
    cmd: ValidatorCommand,
    config: &Config,
    out: &mut Output,
) -> Result<(), CliError> {
    let store = open_store(config)?;
    let path = account_flag(config)?;
    let mut account = account_from_path(&store, path, &config.wallet_passphrase)?;
    let node = connect(config, out)?;

    match cmd {
        ValidatorCommand::Info => {
            let info = validator::info(&node, account.public_key()).await?;
            out.field("Index", info.index);
            out.field("Status", info.status);
            out.field("Balance", validator::format_balance(info.balance));
            out.verbose_field(
                "Effective balance",
                validator::format_balance(info.validator.effective_balance),
            );
            out.verbose_field("Activation epoch", info.validator.activation_epoch);
            if info.validator.has_exit_epoch() {
                out.verbose_field("Exit epoch", info.validator.exit_epoch);
            }
        }
        ValidatorCommand::Exit { epoch, .. } => {
            unlock_account(&mut account, &config.passphrase)?;
            let options = validator::ExitOptions {
                epoch,
                generate: config.generate,
                wait: config.wait,
                poll_interval: None,
                max_polls: None,
            };
            let exit = validator::exit(&node, &account, &options, out).await?;

            txlog::record(
                &config.log,
                &TxRecord {
                    time: Utc::now(),
                    command: "validator exit",
                    account: path,
                    generated: config.generate,
                    data: serde_json::to_value(&exit)?,
                },
            );
            if config.generate {
                out.line(serde_json::to_string(&exit)?);
            }
        }
    }
    Ok(())
}
