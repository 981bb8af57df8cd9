//! EIP-2335 style encryption of secrets under a passphrase.
//!
//! A secret is encrypted with AES-128-CTR under the first half of a
//! PBKDF2-HMAC-SHA256 derived key; the second half of the derived key is
//! hashed together with the ciphertext to form a checksum, which is how a
//! wrong passphrase is detected.

use crate::errors::WalletError;
use aes::Aes128;
use ctr::cipher::{KeyIvInit, StreamCipher};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// PBKDF2 iteration count used for new keystores.
pub const DEFAULT_PBKDF2_ROUNDS: u32 = 262_144;

const DKLEN: usize = 32;
const SALT_LEN: usize = 32;
const IV_LEN: usize = 16;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;

/// The `crypto` section of a keystore.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crypto {
    /// Key derivation function
    pub kdf: KdfModule,
    /// Passphrase checksum
    pub checksum: ChecksumModule,
    /// Cipher and ciphertext
    pub cipher: CipherModule,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfModule {
    pub function: String,
    pub params: Pbkdf2Params,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pbkdf2Params {
    pub dklen: u32,
    pub c: u32,
    pub prf: String,
    pub salt: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecksumModule {
    pub function: String,
    pub params: EmptyParams,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyParams {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherModule {
    pub function: String,
    pub params: CipherParams,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherParams {
    pub iv: String,
}

/// Strips control characters from a passphrase.
fn normalize_passphrase(passphrase: &[u8]) -> Zeroizing<Vec<u8>> {
    let text = String::from_utf8_lossy(passphrase);
    Zeroizing::new(
        text.chars()
            .filter(|c| !c.is_control())
            .collect::<String>()
            .into_bytes(),
    )
}

fn derive_key(passphrase: &[u8], salt: &[u8], rounds: u32) -> Zeroizing<[u8; DKLEN]> {
    let passphrase = normalize_passphrase(passphrase);
    let mut key = Zeroizing::new([0u8; DKLEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(&passphrase, salt, rounds, &mut key[..]);
    key
}

fn checksum(key: &[u8; DKLEN], ciphertext: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(&key[16..]);
    hasher.update(ciphertext);
    hasher.finalize().into()
}

fn apply_cipher(key: &[u8; DKLEN], iv: &[u8], data: &mut [u8]) -> Result<(), WalletError> {
    let mut cipher = Aes128Ctr::new_from_slices(&key[..16], iv)
        .map_err(|e| WalletError::UnsupportedKeystore(format!("cipher parameters: {}", e)))?;
    cipher.apply_keystream(data);
    Ok(())
}

impl Crypto {
    /// Encrypts `secret` under `passphrase` with `rounds` PBKDF2 iterations.
    pub fn encrypt(secret: &[u8], passphrase: &[u8], rounds: u32) -> Result<Self, WalletError> {
        let mut rng = rand::thread_rng();
        let mut salt = [0u8; SALT_LEN];
        rng.fill_bytes(&mut salt);
        let mut iv = [0u8; IV_LEN];
        rng.fill_bytes(&mut iv);

        let key = derive_key(passphrase, &salt, rounds);
        let mut ciphertext = secret.to_vec();
        apply_cipher(&key, &iv, &mut ciphertext)?;

        Ok(Crypto {
            kdf: KdfModule {
                function: "pbkdf2".to_string(),
                params: Pbkdf2Params {
                    dklen: DKLEN as u32,
                    c: rounds,
                    prf: "hmac-sha256".to_string(),
                    salt: hex::encode(salt),
                },
                message: String::new(),
            },
            checksum: ChecksumModule {
                function: "sha256".to_string(),
                params: EmptyParams::default(),
                message: hex::encode(checksum(&key, &ciphertext)),
            },
            cipher: CipherModule {
                function: "aes-128-ctr".to_string(),
                params: CipherParams { iv: hex::encode(iv) },
                message: hex::encode(ciphertext),
            },
        })
    }

    /// Decrypts the secret, failing with `InvalidPassphrase` on a checksum mismatch.
    pub fn decrypt(&self, passphrase: &[u8]) -> Result<Zeroizing<Vec<u8>>, WalletError> {
        if self.kdf.function != "pbkdf2" || self.kdf.params.prf != "hmac-sha256" {
            return Err(WalletError::UnsupportedKeystore(format!(
                "kdf {} with prf {}",
                self.kdf.function, self.kdf.params.prf
            )));
        }
        if self.kdf.params.dklen as usize != DKLEN {
            return Err(WalletError::UnsupportedKeystore(format!(
                "derived key length {}",
                self.kdf.params.dklen
            )));
        }
        if self.cipher.function != "aes-128-ctr" {
            return Err(WalletError::UnsupportedKeystore(format!(
                "cipher {}",
                self.cipher.function
            )));
        }

        let salt = hex::decode(&self.kdf.params.salt).map_err(ethdo_core::CoreError::from)?;
        let iv = hex::decode(&self.cipher.params.iv).map_err(ethdo_core::CoreError::from)?;
        let ciphertext = hex::decode(&self.cipher.message).map_err(ethdo_core::CoreError::from)?;
        let expected = hex::decode(&self.checksum.message).map_err(ethdo_core::CoreError::from)?;

        let key = derive_key(passphrase, &salt, self.kdf.params.c);
        if checksum(&key, &ciphertext)[..] != expected[..] {
            return Err(WalletError::InvalidPassphrase);
        }

        let mut plaintext = Zeroizing::new(ciphertext);
        apply_cipher(&key, &iv, &mut plaintext)?;
        Ok(plaintext)
    }
}
