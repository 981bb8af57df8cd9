//! Tests for signing and verifying data across the wallet and core crates.

use ethdo::commands::{account, signature, wallet};
use ethdo::{CliError, Output};
use ethdo_core::ssz::bytes_root;
use ethdo_core::{compute_signing_root, Signature};
use ethdo_wallet::Store;

const DOMAIN: &str = "0x0300000000000000000000000000000000000000000000000000000000000000";

async fn setup(dir: &std::path::Path) -> (Store, String) {
    let store = Store::filesystem(dir, b"").with_kdf_rounds(16);
    wallet::create(&store, "Signing", "nd", "", None).await.unwrap();
    let account = account::create(&store, "Signing/key", "pw", "").await.unwrap();
    (store, account.public_key().to_string())
}

/// Tests that a signature made by the sign command verifies.
#[tokio::test]
async fn test_sign_then_verify() {
    let dir = tempfile::tempdir().unwrap();
    let (store, signer) = setup(dir.path()).await;
    let mut out = Output::captured(false, false, false);

    let sig = signature::sign(&store, "Signing/key", "pw", "", "0x01020304", Some(DOMAIN), &mut out)
        .await
        .unwrap();

    // Against the explicit signer
    signature::verify(
        &store,
        "",
        "",
        "0x01020304",
        Some(DOMAIN),
        &sig.to_string(),
        Some(&signer),
        &mut out,
    )
    .await
    .unwrap();

    // Against the account's own key
    signature::verify(
        &store,
        "Signing/key",
        "",
        "0x01020304",
        Some(DOMAIN),
        &sig.to_string(),
        None,
        &mut out,
    )
    .await
    .unwrap();
}

/// Tests that the signature covers the signing root of the padded data.
#[tokio::test]
async fn test_signature_over_signing_root() {
    let dir = tempfile::tempdir().unwrap();
    let (store, signer) = setup(dir.path()).await;
    let mut out = Output::captured(false, false, true);

    let sig = signature::sign(&store, "Signing/key", "pw", "", "0xff", None, &mut out)
        .await
        .unwrap();

    let mut object = [0u8; 32];
    object[0] = 0xff;
    assert_eq!(bytes_root(&[0xff]), object);
    let root = compute_signing_root(object, [0u8; 32]);

    let public_key = ethdo_core::PublicKey::from_hex(&signer).unwrap();
    assert!(public_key.verify(&root, &sig));

    // Debug output reports the signing root
    assert_eq!(out.lines().len(), 1);
    assert!(out.lines()[0].starts_with("Signing root is 0x"));
}

/// Tests that changed data, domain or passphrase are all caught.
#[tokio::test]
async fn test_verification_failures() {
    let dir = tempfile::tempdir().unwrap();
    let (store, signer) = setup(dir.path()).await;
    let mut out = Output::captured(false, false, false);

    let sig: Signature =
        signature::sign(&store, "Signing/key", "pw", "", "0x01020304", Some(DOMAIN), &mut out)
            .await
            .unwrap();

    let err = signature::verify(
        &store,
        "",
        "",
        "0x01020305",
        Some(DOMAIN),
        &sig.to_string(),
        Some(&signer),
        &mut out,
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Not verified");

    assert!(matches!(
        signature::verify(&store, "", "", "0x01020304", None, &sig.to_string(), Some(&signer), &mut out)
            .await,
        Err(CliError::NotVerified)
    ));

    assert!(matches!(
        signature::sign(&store, "Signing/key", "wrong", "", "0x01", None, &mut out).await,
        Err(CliError::InvalidAccountPassphrase)
    ));

    assert!(matches!(
        signature::sign(&store, "Signing/key", "pw", "", "0x01", Some("0x03"), &mut out).await,
        Err(CliError::InvalidFlag { flag: "domain", .. })
    ));
}
