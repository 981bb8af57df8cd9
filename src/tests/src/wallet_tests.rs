//! Tests for wallets and accounts through the CLI commands.

use ethdo::cli::{AccountCommand, Command, WalletCommand};
use ethdo::commands::{self, account, wallet};
use ethdo::{accounts_from_path, CliError, Config, GlobalFlags, Output};
use ethdo_wallet::{Store, WalletError, WalletKind};
use std::path::Path;

const ROUNDS: u32 = 16;

const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon abandon abandon abandon \
                        abandon abandon abandon abandon abandon abandon abandon art";

fn store(dir: &Path) -> Store {
    Store::filesystem(dir, b"").with_kdf_rounds(ROUNDS)
}

/// Tests creating an HD wallet and accounts, then resolving them by path.
#[tokio::test]
async fn test_hd_wallet_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    // Create the wallet from a known mnemonic
    let (created, generated) = wallet::create(&store, "HD", "hd", "wallet-pw", Some(MNEMONIC))
        .await
        .unwrap();
    assert_eq!(created.kind(), WalletKind::HierarchicalDeterministic);
    assert!(generated.is_none());

    // Create accounts out of name order
    for name in ["Validator 2", "Validator 1", "Withdrawal"] {
        account::create(&store, &format!("HD/{}", name), "account-pw", "wallet-pw")
            .await
            .unwrap();
    }

    let info = wallet::info(&store, "HD").await.unwrap();
    assert_eq!(info.next_account(), 3);

    // Pattern lookup is sorted and anchored
    let accounts = accounts_from_path(&store, "HD/Validator.*", "").unwrap();
    let names: Vec<&str> = accounts.iter().map(|a| a.name()).collect();
    assert_eq!(names, ["Validator 1", "Validator 2"]);

    // The first account created sits at index 0 and can be found by path
    let first = account::info(&store, "HD/Validator 2", "").await.unwrap();
    assert_eq!(first.path(), Some("m/12381/3600/0/0/0"));
    let by_path = account::info(&store, "HD/m/12381/3600/0/0/0", "").await.unwrap();
    assert_eq!(by_path.public_key(), first.public_key());

    // A path with no stored account is derived with the wallet passphrase
    let derived = account::info(&store, "HD/m/12381/3600/7/0/0", "wallet-pw")
        .await
        .unwrap();
    assert!(derived.is_unlocked());
    let err = account::info(&store, "HD/m/12381/3600/7/0/0", "bad-pw")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid wallet passphrase");
}

/// Tests that a failed wallet write leaves nothing behind that a later
/// account could derive again.
#[tokio::test]
async fn test_failed_wallet_write_never_reuses_index() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    let (created, _) = wallet::create(&store, "HD", "hd", "wallet-pw", Some(MNEMONIC))
        .await
        .unwrap();
    let id = created.id().to_string();
    let record = dir.path().join(&id).join(&id);
    let saved = std::fs::read(&record).unwrap();

    // A directory in place of the wallet record makes the wallet write fail
    let mut hd = store.open_wallet("HD").unwrap();
    std::fs::remove_file(&record).unwrap();
    std::fs::create_dir(&record).unwrap();
    {
        let mut unlocked = hd.unlock_scoped(b"wallet-pw").unwrap();
        assert!(matches!(
            unlocked.create_account(&store, "first", b"pw"),
            Err(WalletError::FileError(_))
        ));
        assert_eq!(unlocked.next_account(), 0);
    }
    std::fs::remove_dir(&record).unwrap();
    std::fs::write(&record, &saved).unwrap();
    assert_eq!(store.open_wallet("HD").unwrap().accounts().count(), 0);

    for name in ["second", "third"] {
        account::create(&store, &format!("HD/{}", name), "pw", "wallet-pw")
            .await
            .unwrap();
    }
    let accounts = accounts_from_path(&store, "HD/", "").unwrap();
    let paths: Vec<Option<&str>> = accounts.iter().map(|a| a.path()).collect();
    assert_eq!(
        paths,
        [Some("m/12381/3600/0/0/0"), Some("m/12381/3600/1/0/0")]
    );
    assert_ne!(accounts[0].public_key(), accounts[1].public_key());
}

/// Tests that the same mnemonic always yields the same keys.
#[tokio::test]
async fn test_mnemonic_is_deterministic() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let mut keys = Vec::new();
    for dir in [&first, &second] {
        let store = store(dir.path());
        wallet::create(&store, "HD", "hd", "pw", Some(MNEMONIC))
            .await
            .unwrap();
        let account = account::create(&store, "HD/a", "pw", "pw").await.unwrap();
        keys.push(*account.public_key());
    }
    assert_eq!(keys[0], keys[1]);
}

/// Tests account key export and its passphrase checks.
#[tokio::test]
async fn test_account_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());
    wallet::create(&store, "ND", "nd", "", None).await.unwrap();
    account::create(&store, "ND/a", "secret", "").await.unwrap();

    let key = account::key(&store, "ND/a", "secret", "").await.unwrap();
    assert!(key.starts_with("0x"));
    assert_eq!(key.len(), 66);

    let err = account::key(&store, "ND/a", "wrong", "").await.unwrap_err();
    assert_eq!(err.to_string(), "invalid account passphrase");

    assert!(matches!(
        account::key(&store, "ND/a", "", "").await,
        Err(CliError::MissingFlag("passphrase"))
    ));
}

/// Tests that HD wallets need a passphrase and account names are validated.
#[tokio::test]
async fn test_creation_errors() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(dir.path());

    assert!(matches!(
        wallet::create(&store, "HD", "hd", "", None).await,
        Err(CliError::MissingFlag("walletpassphrase"))
    ));
    assert!(matches!(
        wallet::create(&store, "X", "distributed", "", None).await,
        Err(CliError::Wallet(WalletError::UnknownWalletType(_)))
    ));

    wallet::create(&store, "ND", "nd", "", None).await.unwrap();
    assert!(matches!(
        wallet::create(&store, "ND", "nd", "", None).await,
        Err(CliError::Wallet(WalletError::WalletExists(_)))
    ));

    let err = account::create(&store, "ND/", "pw", "").await.unwrap_err();
    assert_eq!(err.to_string(), "no account name");

    account::create(&store, "ND/a", "pw", "").await.unwrap();
    assert!(matches!(
        account::create(&store, "ND/a", "pw", "").await,
        Err(CliError::Wallet(WalletError::AccountExists(_)))
    ));
}

/// Tests that a wrong store passphrase is reported as such by every command.
#[tokio::test]
async fn test_store_passphrase() {
    let dir = tempfile::tempdir().unwrap();
    let secured = Store::filesystem(dir.path(), b"store-pw").with_kdf_rounds(ROUNDS);
    wallet::create(&secured, "Secure", "nd", "", None).await.unwrap();
    account::create(&secured, "Secure/a", "pw", "").await.unwrap();

    // Records on disk are not readable JSON wallets
    let plain = store(dir.path());
    let err = wallet::list(&plain).await.unwrap_err();
    assert_eq!(err.to_string(), "Incorrect store passphrase");
    let err = account::info(&plain, "Secure/a", "").await.unwrap_err();
    assert_eq!(err.to_string(), "Incorrect store passphrase");

    let account = account::info(&secured, "Secure/a", "").await.unwrap();
    assert_eq!(account.name(), "a");
}

/// Tests that a generated mnemonic is printed even in quiet mode, as it is
/// the only backup of the new wallet's seed.
#[tokio::test]
async fn test_quiet_create_still_shows_mnemonic() {
    let dir = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    let flags = GlobalFlags {
        basedir: Some(dir.path().to_path_buf()),
        walletpassphrase: Some("wallet-pw".to_string()),
        quiet: true,
        ..Default::default()
    };
    let config = Config::resolve(&flags, None, |_| None, Some(home.path())).unwrap();

    assert!(config.quiet);
    let mut out = Output::captured(config.quiet, config.verbose, config.debug);
    commands::execute(
        Command::Wallet(WalletCommand::Create {
            wallet: "Quiet".to_string(),
            kind: "hd".to_string(),
            mnemonic: None,
        }),
        &config,
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(out.lines().len(), 1);
    let mnemonic = out.lines()[0]
        .strip_prefix("Mnemonic: ")
        .unwrap()
        .to_string();
    assert_eq!(mnemonic.split(' ').count(), 24);

    // The printed mnemonic restores the same wallet
    let restored_dir = tempfile::tempdir().unwrap();
    let restored = store(restored_dir.path());
    wallet::create(&restored, "Quiet", "hd", "wallet-pw", Some(&mnemonic))
        .await
        .unwrap();
    let original = account::create(&store(dir.path()), "Quiet/a", "pw", "wallet-pw")
        .await
        .unwrap();
    let copy = account::create(&restored, "Quiet/a", "pw", "wallet-pw")
        .await
        .unwrap();
    assert_eq!(original.public_key(), copy.public_key());
}

/// Tests the rendered output of the wallet commands.
#[tokio::test]
async fn test_wallet_command_output() {
    let dir = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    let flags = GlobalFlags {
        basedir: Some(dir.path().to_path_buf()),
        walletpassphrase: Some("wallet-pw".to_string()),
        passphrase: Some("account-pw".to_string()),
        ..Default::default()
    };
    let mut config = Config::resolve(&flags, None, |_| None, Some(home.path())).unwrap();

    // Generated mnemonics are shown once
    let mut out = Output::captured(false, false, false);
    commands::execute(
        Command::Wallet(WalletCommand::Create {
            wallet: "Primary".to_string(),
            kind: "hd".to_string(),
            mnemonic: None,
        }),
        &config,
        &mut out,
    )
    .await
    .unwrap();
    let mnemonic = out.lines()[0].trim_start_matches("Mnemonic: ");
    assert_eq!(mnemonic.split(' ').count(), 24);

    for name in ["b", "a"] {
        config.account = format!("Primary/{}", name);
        let mut out = Output::captured(false, false, false);
        commands::execute(Command::Account(AccountCommand::Create), &config, &mut out)
            .await
            .unwrap();
        assert!(out.lines().is_empty());
    }

    let mut out = Output::captured(false, false, false);
    commands::execute(
        Command::Wallet(WalletCommand::Accounts {
            wallet: "Primary".to_string(),
        }),
        &config,
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(out.lines(), ["a", "b"]);

    let mut out = Output::captured(false, false, false);
    commands::execute(
        Command::Wallet(WalletCommand::Info {
            wallet: "Primary".to_string(),
        }),
        &config,
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(out.lines()[0], "Type: hierarchical deterministic");
    assert_eq!(out.lines()[2], "Accounts: 2");

    // Quiet runs print nothing
    let mut out = Output::captured(true, false, false);
    commands::execute(
        Command::Wallet(WalletCommand::Delete {
            wallet: "Primary".to_string(),
        }),
        &config,
        &mut out,
    )
    .await
    .unwrap();
    assert!(out.lines().is_empty());
    assert!(wallet::list(&store(dir.path())).await.unwrap().is_empty());
}
