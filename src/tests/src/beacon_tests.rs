//! Tests for the beacon client and the chain and node commands.

use crate::mock;
use chrono::{TimeZone, Utc};
use ethdo::cli::{ChainCommand, Command, NodeCommand};
use ethdo::commands::{self, chain, node};
use ethdo::{CliError, Config, GlobalFlags, Output};
use ethdo_beacon::{BeaconClient, BeaconNode, ConfigValue};
use ethdo_core::SecretKey;
use std::time::Duration;

/// Genesis time of the mock chain.
const GENESIS_TIME: u64 = 1_606_824_023;

fn config_for(connection: &str, verbose: bool) -> Config {
    let home = tempfile::tempdir().unwrap();
    let flags = GlobalFlags {
        connection: Some(connection.to_string()),
        verbose,
        ..Default::default()
    };
    Config::resolve(&flags, None, |_| None, Some(home.path())).unwrap()
}

async fn mock_node() -> mock::MockNode {
    let key = SecretKey::from_ikm(&[9u8; 32]).unwrap();
    mock::start(key.public_key(), GENESIS_TIME).await
}

/// Tests the client queries against the mock node.
#[tokio::test]
async fn test_client_queries() {
    let node = mock_node().await;
    let client = BeaconClient::connect(&node.connection(), Duration::from_secs(5)).unwrap();

    // Chain configuration values are coerced
    let config = client.fetch_chain_config().await.unwrap();
    assert_eq!(config.uint("SECONDS_PER_SLOT"), Some(12));
    assert_eq!(
        config.get("CONFIG_NAME"),
        Some(&ConfigValue::String("mock".to_string()))
    );
    assert_eq!(config.bytes("DOMAIN_VOLUNTARY_EXIT"), Some(vec![4, 0, 0, 0]));

    // Genesis
    let genesis_time = client.fetch_genesis_time().await.unwrap();
    assert_eq!(genesis_time.timestamp() as u64, GENESIS_TIME);

    // Node
    assert!(!client.fetch_syncing().await.unwrap());
    let version = client.fetch_version().await.unwrap();
    assert_eq!(version.version, "Mock/v1.2.3");
}

/// Tests the chain status command at a fixed time.
#[tokio::test]
async fn test_chain_status() {
    let node = mock_node().await;
    let client = BeaconClient::connect(&node.connection(), Duration::from_secs(5)).unwrap();

    let now = Utc.timestamp_opt((GENESIS_TIME + 12 * 32 * 3 + 13) as i64, 0).unwrap();
    let status = chain::status(&client, now).await.unwrap();
    assert_eq!(status.slot, 97);
    assert_eq!(status.epoch, 3);
    assert_eq!(
        status.slot_start.timestamp() as u64,
        GENESIS_TIME + 97 * 12
    );
}

/// Tests the node info command.
#[tokio::test]
async fn test_node_info() {
    let node = mock_node().await;
    let client = BeaconClient::connect(&node.connection(), Duration::from_secs(5)).unwrap();

    let info = node::info(&client).await.unwrap();
    assert_eq!(info.version.metadata, "x86_64-linux");
    assert_eq!(info.sync.head_slot, 4000);
}

/// Tests the rendered output of chain info.
#[tokio::test]
async fn test_chain_info_output() {
    let node = mock_node().await;

    let config = config_for(&node.connection(), false);
    let mut out = Output::captured(false, false, false);
    commands::execute(Command::Chain(ChainCommand::Info), &config, &mut out)
        .await
        .unwrap();
    assert_eq!(
        out.lines(),
        [
            "Genesis time: 2020-12-01T12:00:23Z".to_string(),
            format!("Genesis validators root: {}", mock::GENESIS_VALIDATORS_ROOT),
        ]
    );

    // Verbose output adds the configuration, sorted by key
    let config = config_for(&node.connection(), true);
    let mut out = Output::captured(false, true, false);
    commands::execute(Command::Chain(ChainCommand::Info), &config, &mut out)
        .await
        .unwrap();
    assert_eq!(out.lines().len(), 7);
    assert_eq!(out.lines()[2], "CONFIG_NAME: mock");
    assert_eq!(out.lines()[3], "DOMAIN_VOLUNTARY_EXIT: 0x04000000");
}

/// Tests that connecting with debug output announces the endpoint.
#[tokio::test]
async fn test_node_info_debug_output() {
    let node = mock_node().await;

    let config = config_for(&node.connection(), false);
    let mut out = Output::captured(false, false, true);
    commands::execute(Command::Node(NodeCommand::Info), &config, &mut out)
        .await
        .unwrap();
    assert_eq!(out.lines()[0], format!("Connecting to {}", node.connection()));
    assert_eq!(out.lines()[1], "Version: Mock/v1.2.3");
    assert_eq!(out.lines()[2], "Syncing: false");
}

/// Tests that an empty connection is refused before any request.
#[tokio::test]
async fn test_no_connection() {
    let mut config = config_for("unused:1", false);
    config.connection = String::new();
    let mut out = Output::captured(false, false, false);

    let err = commands::execute(Command::Node(NodeCommand::Info), &config, &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::NoConnection));
    assert_eq!(err.to_string(), "no connection");
}

/// Tests that an unreachable node gives a contextual error.
#[tokio::test]
async fn test_unreachable_node() {
    let config = {
        let mut config = config_for("127.0.0.1:9", false);
        config.timeout = Duration::from_secs(2);
        config
    };
    let mut out = Output::captured(false, false, false);

    let err = commands::execute(Command::Chain(ChainCommand::Status), &config, &mut out)
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("failed to obtain genesis"));
}
