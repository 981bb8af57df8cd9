//! Signing roots and domains over SSZ hash tree roots.

use crate::types::{Domain, DomainType, Root, Version};
use tree_hash::{Hash256, TreeHash};
use tree_hash_derive::TreeHash;

/// Hash tree root of any SSZ object, as plain bytes.
pub fn hash_tree_root<T: TreeHash>(object: &T) -> Root {
    object.tree_hash_root().0
}

/// Hash tree root of a fixed-length byte vector.
pub fn bytes_root(bytes: &[u8]) -> Root {
    tree_hash::merkle_root(bytes, 0).0
}

/// The container a signature actually commits to.
#[derive(Clone, Debug, PartialEq, Eq, TreeHash)]
pub struct SigningData {
    /// Root of the object being signed
    pub object_root: Hash256,
    /// The signature domain
    pub domain: Hash256,
}

/// Fork identification mixed into a domain.
#[derive(Clone, Debug, PartialEq, Eq, TreeHash)]
pub struct ForkData {
    pub current_version: Version,
    pub genesis_validators_root: Hash256,
}

/// Computes a signature domain for a fork of a chain.
pub fn compute_domain(
    domain_type: DomainType,
    fork_version: Version,
    genesis_validators_root: Root,
) -> Domain {
    let fork_data_root = hash_tree_root(&ForkData {
        current_version: fork_version,
        genesis_validators_root: Hash256::from(genesis_validators_root),
    });

    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(&domain_type);
    domain[4..].copy_from_slice(&fork_data_root[..28]);
    domain
}

/// Computes the signing root of an object root in a domain.
pub fn compute_signing_root(object_root: Root, domain: Domain) -> Root {
    hash_tree_root(&SigningData {
        object_root: Hash256::from(object_root),
        domain: Hash256::from(domain),
    })
}
