//! AES-256-GCM encryption/decryption
//!
//! Provides authenticated encryption for the vault document. Each
//! encryption operation generates a unique nonce; the ciphertext blob is
//! self-describing: `nonce || sealed payload + tag`, raw bytes with no
//! surrounding metadata.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};

use crate::error::{VaultError, VaultResult};

use super::DerivedKey;

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// An encrypter/decrypter of opaque byte payloads
///
/// Kept open for future cipher variants; callers only ever hold a
/// `dyn Crypter`.
pub trait Crypter {
    /// Encrypt a plaintext, producing a self-describing ciphertext blob
    fn encrypt(&self, plaintext: &[u8]) -> VaultResult<Vec<u8>>;

    /// Decrypt a blob previously produced by [`Crypter::encrypt`]
    fn decrypt(&self, blob: &[u8]) -> VaultResult<Vec<u8>>;
}

/// AES-256-GCM implementation of [`Crypter`]
pub struct AesGcmCrypter {
    cipher: Aes256Gcm,
}

impl AesGcmCrypter {
    /// Create a new crypter keyed by a derived key
    pub fn new(key: &DerivedKey) -> Self {
        let key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }
}

impl Crypter for AesGcmCrypter {
    fn encrypt(&self, plaintext: &[u8]) -> VaultResult<Vec<u8>> {
        // A fresh nonce per call; reuse under the same key would break
        // both confidentiality and integrity
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng
            .try_fill_bytes(&mut nonce_bytes)
            .map_err(|e| VaultError::Random(e.to_string()))?;
        let nonce = Nonce::from_slice(&nonce_bytes);

        let sealed = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| VaultError::Encryption(e.to_string()))?;

        let mut blob = Vec::with_capacity(NONCE_SIZE + sealed.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&sealed);
        Ok(blob)
    }

    fn decrypt(&self, blob: &[u8]) -> VaultResult<Vec<u8>> {
        if blob.len() < NONCE_SIZE {
            return Err(VaultError::MalformedCiphertext {
                len: blob.len(),
                min: NONCE_SIZE,
            });
        }

        let (nonce_bytes, sealed) = blob.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        // Wrong key, corrupted data and tampering are indistinguishable
        // on purpose
        self.cipher
            .decrypt(nonce, sealed)
            .map_err(|_| VaultError::Authentication)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::crypto::key_derivation::{derive_key, KeyDerivationParams};
    use crate::crypto::Passphrase;

    fn test_crypter() -> AesGcmCrypter {
        let key = derive_key(
            &Passphrase::from("test_passphrase"),
            &KeyDerivationParams::legacy(),
        );
        AesGcmCrypter::new(&key)
    }

    #[test]
    fn test_round_trip() {
        let crypter = test_crypter();
        let plaintext = b"a data string to be encrypted";

        let blob = crypter.encrypt(plaintext).unwrap();
        let decrypted = crypter.decrypt(&blob).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_round_trip_empty_plaintext() {
        let crypter = test_crypter();
        let blob = crypter.encrypt(b"").unwrap();
        assert!(blob.len() >= NONCE_SIZE);
        assert_eq!(crypter.decrypt(&blob).unwrap(), b"");
    }

    #[test]
    fn test_round_trip_large_plaintext() {
        let crypter = test_crypter();
        let plaintext: Vec<u8> = (0..100_000).map(|i| (i % 256) as u8).collect();

        let blob = crypter.encrypt(&plaintext).unwrap();
        assert_eq!(crypter.decrypt(&blob).unwrap(), plaintext);
    }

    #[test]
    fn test_ciphertext_differs_from_plaintext() {
        let crypter = test_crypter();
        let plaintext = b"secret data";
        let blob = crypter.encrypt(plaintext).unwrap();
        assert_ne!(&blob[NONCE_SIZE..], plaintext.as_slice());
    }

    #[test]
    fn test_nonce_uniqueness() {
        // Probabilistic, but a collision here is a hard bug
        let crypter = test_crypter();
        let mut nonces = HashSet::new();
        for _ in 0..1000 {
            let blob = crypter.encrypt(b"same plaintext").unwrap();
            let nonce: [u8; NONCE_SIZE] = blob[..NONCE_SIZE].try_into().unwrap();
            assert!(nonces.insert(nonce), "nonce repeated across encryptions");
        }
    }

    #[test]
    fn test_single_bit_tamper_detected() {
        let crypter = test_crypter();
        let blob = crypter.encrypt(b"tamper target").unwrap();

        for byte_idx in 0..blob.len() {
            for bit in 0..8 {
                let mut tampered = blob.clone();
                tampered[byte_idx] ^= 1 << bit;
                let result = crypter.decrypt(&tampered);
                assert!(
                    matches!(result, Err(VaultError::Authentication)),
                    "flipping bit {} of byte {} was not detected",
                    bit,
                    byte_idx
                );
            }
        }
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let crypter = test_crypter();
        let other = AesGcmCrypter::new(&derive_key(
            &Passphrase::from("a different passphrase"),
            &KeyDerivationParams::legacy(),
        ));

        let blob = crypter.encrypt(b"secret data").unwrap();
        let result = other.decrypt(&blob);
        assert!(matches!(result, Err(VaultError::Authentication)));
    }

    #[test]
    fn test_short_blob_is_malformed() {
        let crypter = test_crypter();
        let result = crypter.decrypt(&[0u8; NONCE_SIZE - 1]);
        assert!(matches!(
            result,
            Err(VaultError::MalformedCiphertext { len: 11, min: 12 })
        ));
    }

    #[test]
    fn test_decrypt_is_order_independent() {
        // The nonce travels with each blob, so blobs can be opened in any
        // order
        let crypter = test_crypter();
        let blob1 = crypter.encrypt(b"first").unwrap();
        let blob2 = crypter.encrypt(b"second").unwrap();

        assert_eq!(crypter.decrypt(&blob2).unwrap(), b"second");
        assert_eq!(crypter.decrypt(&blob1).unwrap(), b"first");
    }
}
