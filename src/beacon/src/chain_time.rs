//! Slot and epoch arithmetic from genesis time.

use crate::chain_config::ChainConfig;
use crate::errors::BeaconError;
use chrono::{DateTime, Duration, Utc};
use ethdo_core::types::{Epoch, Slot};

/// Clock of a chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainTime {
    genesis: DateTime<Utc>,
    seconds_per_slot: u64,
    slots_per_epoch: u64,
}

impl ChainTime {
    /// Creates a clock. Zero slot lengths or epoch sizes are rejected.
    pub fn new(
        genesis: DateTime<Utc>,
        seconds_per_slot: u64,
        slots_per_epoch: u64,
    ) -> Result<Self, BeaconError> {
        if seconds_per_slot == 0 || slots_per_epoch == 0 {
            return Err(BeaconError::ConfigValueError {
                key: "SECONDS_PER_SLOT/SLOTS_PER_EPOCH".to_string(),
                value: format!("{}/{}", seconds_per_slot, slots_per_epoch),
                message: "must be non-zero".to_string(),
            });
        }
        Ok(Self {
            genesis,
            seconds_per_slot,
            slots_per_epoch,
        })
    }

    /// Creates a clock from a chain configuration.
    pub fn from_config(genesis: DateTime<Utc>, config: &ChainConfig) -> Result<Self, BeaconError> {
        let lookup = |key: &str| {
            config.uint(key).ok_or_else(|| BeaconError::ConfigValueError {
                key: key.to_string(),
                value: config
                    .get(key)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
                message: "missing or not an integer".to_string(),
            })
        };
        Self::new(
            genesis,
            lookup("SECONDS_PER_SLOT")?,
            lookup("SLOTS_PER_EPOCH")?,
        )
    }

    /// Gets the genesis time.
    pub fn genesis(&self) -> DateTime<Utc> {
        self.genesis
    }

    /// Gets the slot length in seconds.
    pub fn seconds_per_slot(&self) -> u64 {
        self.seconds_per_slot
    }

    /// Slot at `now`; zero before genesis.
    pub fn slot_at(&self, now: DateTime<Utc>) -> Slot {
        let elapsed = (now - self.genesis).num_seconds();
        if elapsed <= 0 {
            return 0;
        }
        elapsed as u64 / self.seconds_per_slot
    }

    /// Epoch containing `slot`.
    pub fn epoch_of(&self, slot: Slot) -> Epoch {
        slot / self.slots_per_epoch
    }

    /// Epoch at `now`.
    pub fn epoch_at(&self, now: DateTime<Utc>) -> Epoch {
        self.epoch_of(self.slot_at(now))
    }

    /// Start time of `slot`.
    pub fn slot_start(&self, slot: Slot) -> DateTime<Utc> {
        let offset = slot.saturating_mul(self.seconds_per_slot).min(i64::MAX as u64);
        self.genesis + Duration::seconds(offset as i64)
    }

    /// Current epoch.
    pub fn current_epoch(&self) -> Epoch {
        self.epoch_at(Utc::now())
    }
}
