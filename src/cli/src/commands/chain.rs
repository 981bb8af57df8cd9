//! Chain commands.

use crate::errors::CliError;
use chrono::{DateTime, Utc};
use ethdo_beacon::{BeaconNode, ChainConfig, ChainTime};
use ethdo_core::{Epoch, Root, Slot};
use tracing::debug;

/// Genesis and configuration of a chain.
#[derive(Debug)]
pub struct ChainInfo {
    pub genesis_time: DateTime<Utc>,
    pub genesis_validators_root: Root,
    pub config: ChainConfig,
}

/// Where a chain is now.
#[derive(Debug)]
pub struct ChainStatus {
    pub slot: Slot,
    pub epoch: Epoch,
    /// Start of the current slot
    pub slot_start: DateTime<Utc>,
}

/// Runs the chain info command.
pub async fn info<N: BeaconNode>(node: &N) -> Result<ChainInfo, CliError> {
    let genesis_time = node.fetch_genesis_time().await?;
    let genesis_validators_root = node.fetch_genesis_validators_root().await?;
    let config = node.fetch_chain_config().await?;
    debug!("Chain configuration has {} entries", config.len());
    Ok(ChainInfo {
        genesis_time,
        genesis_validators_root,
        config,
    })
}

/// Runs the chain status command for the time `now`.
pub async fn status<N: BeaconNode>(node: &N, now: DateTime<Utc>) -> Result<ChainStatus, CliError> {
    let genesis_time = node.fetch_genesis_time().await?;
    let config = node.fetch_chain_config().await?;
    let clock = ChainTime::from_config(genesis_time, &config)?;
    debug!(
        "Chain started at {} with {}s slots",
        clock.genesis(),
        clock.seconds_per_slot()
    );

    let slot = clock.slot_at(now);
    Ok(ChainStatus {
        slot,
        epoch: clock.epoch_of(slot),
        slot_start: clock.slot_start(slot),
    })
}
