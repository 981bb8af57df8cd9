//! Tests for the core crate.

use ethdo_core::derivation::{derive_path, validator_signing_path};
use ethdo_core::types::{VoluntaryExit, DOMAIN_VOLUNTARY_EXIT};
use ethdo_core::{compute_domain, compute_signing_root, hash_tree_root, PublicKey, SecretKey};
use rand::RngCore;

/// Seed of the first EIP-2333 test case.
const EIP2333_SEED: &str = "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04";

/// Tests master and child key derivation against the EIP-2333 vector.
#[test]
fn test_eip2333_vector() {
    let seed = hex::decode(EIP2333_SEED).unwrap();

    let master = SecretKey::derive_master(&seed).unwrap();
    assert_eq!(
        hex::encode(&master.to_bytes()[..]),
        "0d7359d57963ab8fbbde1852dcf553fedbc31f464d80ee7d40ae683122b45070"
    );

    let child = master.derive_child(0);
    assert_eq!(
        hex::encode(&child.to_bytes()[..]),
        "2d18bd6c14e6d15bf8b5085c9b74f3daae3b03cc2014770a599d8c1539e50f8e"
    );
}

/// Tests that path derivation walks the same tree as stepwise derivation.
#[test]
fn test_path_matches_stepwise_derivation() {
    let seed = [7u8; 64];
    let by_path = derive_path(&seed, &validator_signing_path(2)).unwrap();

    let stepwise = SecretKey::derive_master(&seed)
        .unwrap()
        .derive_child(12381)
        .derive_child(3600)
        .derive_child(2)
        .derive_child(0)
        .derive_child(0);

    assert_eq!(by_path.public_key(), stepwise.public_key());
}

/// Tests that an exit signature only verifies in the domain it was made for.
#[test]
fn test_exit_signature_domain_separation() {
    let key = SecretKey::from_ikm(&[42u8; 32]).unwrap();
    let exit = VoluntaryExit {
        epoch: 100,
        validator_index: 5,
    };

    let mainnet = compute_domain(DOMAIN_VOLUNTARY_EXIT, [0, 0, 0, 0], [1u8; 32]);
    let other = compute_domain(DOMAIN_VOLUNTARY_EXIT, [0, 0, 0, 1], [1u8; 32]);
    assert_ne!(mainnet, other);

    let root = compute_signing_root(hash_tree_root(&exit), mainnet);
    let signature = key.sign(&root);

    assert!(key.public_key().verify(&root, &signature));
    let other_root = compute_signing_root(hash_tree_root(&exit), other);
    assert!(!key.public_key().verify(&other_root, &signature));
}

/// Tests that keys from random material round-trip and do not verify each
/// other's signatures.
#[test]
fn test_random_keys() {
    let mut rng = rand::thread_rng();
    let keys: Vec<SecretKey> = (0..4)
        .map(|_| {
            let mut ikm = [0u8; 32];
            rng.fill_bytes(&mut ikm);
            SecretKey::from_ikm(&ikm).unwrap()
        })
        .collect();

    let message = [9u8; 32];
    for (i, key) in keys.iter().enumerate() {
        let restored = SecretKey::from_bytes(&key.to_bytes()[..]).unwrap();
        assert_eq!(restored.public_key(), key.public_key());

        let pubkey = PublicKey::from_hex(&key.public_key().to_string()).unwrap();
        let signature = key.sign(&message);
        for (j, other) in keys.iter().enumerate() {
            assert_eq!(other.public_key().verify(&message, &signature), i == j);
        }
        assert!(pubkey.verify(&message, &signature));
    }
}
