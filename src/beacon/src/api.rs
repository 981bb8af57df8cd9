//! The queries ethdo makes of a beacon node.

use crate::chain_config::ChainConfig;
use crate::errors::BeaconError;
use crate::types::{Fork, Genesis, NodeVersion, SyncStatus, Validator, ValidatorInfo};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use ethdo_core::types::{Root, SignedVoluntaryExit};
use ethdo_core::PublicKey;

/// A beacon node.
///
/// Implemented by [`crate::BeaconClient`] over the REST API; tests may
/// provide their own implementation.
#[async_trait]
pub trait BeaconNode: Send + Sync {
    /// Fetches the chain configuration.
    async fn fetch_chain_config(&self) -> Result<ChainConfig, BeaconError>;

    /// Fetches genesis information.
    async fn fetch_genesis(&self) -> Result<Genesis, BeaconError>;

    /// Fetches the genesis time.
    async fn fetch_genesis_time(&self) -> Result<DateTime<Utc>, BeaconError> {
        let genesis = self.fetch_genesis().await?;
        let seconds = i64::try_from(genesis.genesis_time).map_err(|_| {
            BeaconError::DecodeError(format!("genesis time {} out of range", genesis.genesis_time))
        })?;
        Utc.timestamp_opt(seconds, 0).single().ok_or_else(|| {
            BeaconError::DecodeError(format!("genesis time {} out of range", seconds))
        })
    }

    /// Fetches the genesis validators root.
    async fn fetch_genesis_validators_root(&self) -> Result<Root, BeaconError> {
        Ok(self.fetch_genesis().await?.genesis_validators_root)
    }

    /// Fetches the fork of the head state.
    async fn fetch_fork(&self) -> Result<Fork, BeaconError>;

    /// Fetches the node's software version.
    async fn fetch_version(&self) -> Result<NodeVersion, BeaconError>;

    /// Fetches the node's sync status.
    async fn fetch_sync_status(&self) -> Result<SyncStatus, BeaconError>;

    /// Whether the node is syncing.
    async fn fetch_syncing(&self) -> Result<bool, BeaconError> {
        Ok(self.fetch_sync_status().await?.is_syncing)
    }

    /// Fetches a validator's registry record.
    async fn fetch_validator(&self, pubkey: &PublicKey) -> Result<Validator, BeaconError> {
        Ok(self.fetch_validator_info(pubkey).await?.validator)
    }

    /// Fetches a validator's index, balance, status and record.
    async fn fetch_validator_info(&self, pubkey: &PublicKey)
        -> Result<ValidatorInfo, BeaconError>;

    /// Submits a signed voluntary exit.
    async fn submit_voluntary_exit(&self, exit: &SignedVoluntaryExit) -> Result<(), BeaconError>;
}
