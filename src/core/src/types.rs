//! Core types for the Ethereum consensus layer.

use crate::bls::Signature;
use crate::serde_utils::quoted_u64;
use serde::{Deserialize, Serialize};
use std::fmt;
use tree_hash_derive::TreeHash;

/// A 32-byte SSZ hash tree root.
pub type Root = [u8; 32];

/// A 32-byte signature domain.
pub type Domain = [u8; 32];

/// A 4-byte domain type, the first four bytes of a [`Domain`].
pub type DomainType = [u8; 4];

/// A 4-byte fork version.
pub type Version = [u8; 4];

/// An epoch number.
pub type Epoch = u64;

/// A slot number.
pub type Slot = u64;

/// A validator's position in the registry.
pub type ValidatorIndex = u64;

/// Domain type for deposits.
pub const DOMAIN_DEPOSIT: DomainType = [0x03, 0x00, 0x00, 0x00];

/// Domain type for voluntary exits.
pub const DOMAIN_VOLUNTARY_EXIT: DomainType = [0x04, 0x00, 0x00, 0x00];

/// The epoch used for "never".
pub const FAR_FUTURE_EPOCH: Epoch = u64::MAX;

/// A request to exit a validator from the active set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TreeHash)]
pub struct VoluntaryExit {
    /// Earliest epoch at which the exit may be processed
    #[serde(with = "quoted_u64")]
    pub epoch: Epoch,
    /// The exiting validator
    #[serde(with = "quoted_u64")]
    pub validator_index: ValidatorIndex,
}

/// A voluntary exit together with the validator's signature over it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedVoluntaryExit {
    /// The exit message
    pub message: VoluntaryExit,
    /// Signature over the message's signing root
    pub signature: Signature,
}

impl fmt::Display for VoluntaryExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VoluntaryExit {{ epoch: {}, validator_index: {} }}",
            self.epoch, self.validator_index
        )
    }
}
