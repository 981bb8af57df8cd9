//! Core primitives for ethdo.
//!
//! This crate provides the consensus-layer building blocks the wallet and CLI
//! crates share: BLS keys and signatures, EIP-2333 key derivation, SSZ hash
//! tree roots for signed containers, and signature domains.

pub mod bls;
pub mod derivation;
pub mod errors;
pub mod serde_utils;
pub mod ssz;
pub mod types;

// Re-export commonly used types
pub use bls::{PublicKey, SecretKey, Signature};
pub use errors::CoreError;
pub use ssz::{compute_domain, compute_signing_root, hash_tree_root};
pub use tree_hash::{Hash256, TreeHash};
pub use types::{Domain, DomainType, Epoch, Root, Slot, ValidatorIndex, Version};
