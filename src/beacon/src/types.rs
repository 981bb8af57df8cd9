//! Beacon node API response types.

use ethdo_core::serde_utils::{hex_array, quoted_u64};
use ethdo_core::types::{Epoch, Root, Slot, ValidatorIndex, Version, FAR_FUTURE_EPOCH};
use ethdo_core::PublicKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard `{"data": ...}` response wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct DataResponse<T> {
    pub data: T,
}

/// Standard error body.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorMessage {
    #[serde(default)]
    pub message: String,
}

/// Genesis information for a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genesis {
    /// Unix time of genesis, in seconds
    #[serde(with = "quoted_u64")]
    pub genesis_time: u64,
    /// Root of the genesis validator set
    #[serde(with = "hex_array")]
    pub genesis_validators_root: Root,
    /// Fork version at genesis
    #[serde(with = "hex_array")]
    pub genesis_fork_version: Version,
}

/// Fork versions at a state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fork {
    #[serde(with = "hex_array")]
    pub previous_version: Version,
    #[serde(with = "hex_array")]
    pub current_version: Version,
    #[serde(with = "quoted_u64")]
    pub epoch: Epoch,
}

/// Software version of a node, split into version and metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeVersion {
    /// Client name and version, e.g. `Lighthouse/v4.5.0`
    pub version: String,
    /// Remaining build information, e.g. `x86_64-linux`
    pub metadata: String,
}

impl NodeVersion {
    /// Splits a `Product/vX.Y.Z/platform` version string.
    pub fn parse(raw: &str) -> Self {
        let parts: Vec<&str> = raw.splitn(3, '/').collect();
        match parts.as_slice() {
            [product, version, metadata] => NodeVersion {
                version: format!("{}/{}", product, version),
                metadata: metadata.to_string(),
            },
            _ => NodeVersion {
                version: raw.to_string(),
                metadata: String::new(),
            },
        }
    }
}

/// Sync state of a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    #[serde(with = "quoted_u64")]
    pub head_slot: Slot,
    #[serde(with = "quoted_u64")]
    pub sync_distance: u64,
    pub is_syncing: bool,
    #[serde(default)]
    pub is_optimistic: bool,
}

/// Lifecycle status of a validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidatorStatus {
    PendingInitialized,
    PendingQueued,
    ActiveOngoing,
    ActiveExiting,
    ActiveSlashed,
    ExitedUnslashed,
    ExitedSlashed,
    WithdrawalPossible,
    WithdrawalDone,
}

impl ValidatorStatus {
    /// Whether the validator is currently attesting.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            ValidatorStatus::ActiveOngoing
                | ValidatorStatus::ActiveExiting
                | ValidatorStatus::ActiveSlashed
        )
    }
}

impl fmt::Display for ValidatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValidatorStatus::PendingInitialized => "pending_initialized",
            ValidatorStatus::PendingQueued => "pending_queued",
            ValidatorStatus::ActiveOngoing => "active_ongoing",
            ValidatorStatus::ActiveExiting => "active_exiting",
            ValidatorStatus::ActiveSlashed => "active_slashed",
            ValidatorStatus::ExitedUnslashed => "exited_unslashed",
            ValidatorStatus::ExitedSlashed => "exited_slashed",
            ValidatorStatus::WithdrawalPossible => "withdrawal_possible",
            ValidatorStatus::WithdrawalDone => "withdrawal_done",
        };
        f.write_str(text)
    }
}

/// A validator's registry record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub pubkey: PublicKey,
    #[serde(with = "hex_array")]
    pub withdrawal_credentials: Root,
    #[serde(with = "quoted_u64")]
    pub effective_balance: u64,
    pub slashed: bool,
    #[serde(with = "quoted_u64")]
    pub activation_eligibility_epoch: Epoch,
    #[serde(with = "quoted_u64")]
    pub activation_epoch: Epoch,
    #[serde(with = "quoted_u64")]
    pub exit_epoch: Epoch,
    #[serde(with = "quoted_u64")]
    pub withdrawable_epoch: Epoch,
}

impl Validator {
    /// Whether an exit has been scheduled.
    pub fn has_exit_epoch(&self) -> bool {
        self.exit_epoch != FAR_FUTURE_EPOCH
    }
}

/// A validator's record together with its current index, balance and status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    #[serde(with = "quoted_u64")]
    pub index: ValidatorIndex,
    #[serde(with = "quoted_u64")]
    pub balance: u64,
    pub status: ValidatorStatus,
    pub validator: Validator,
}
