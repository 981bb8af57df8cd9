//! Beacon node client for ethdo.
//!
//! Queries a consensus-layer node over the standard REST API: chain
//! configuration and genesis, node version and sync state, validator
//! records, and voluntary exit submission.

pub mod api;
pub mod chain_config;
pub mod chain_time;
pub mod client;
pub mod errors;
pub mod types;

// Re-export commonly used types
pub use api::BeaconNode;
pub use chain_config::{parse_config_value, ChainConfig, ConfigValue};
pub use chain_time::ChainTime;
pub use client::BeaconClient;
pub use errors::BeaconError;
pub use types::{Fork, Genesis, NodeVersion, SyncStatus, Validator, ValidatorInfo, ValidatorStatus};
