//! Passphrase key derivation
//!
//! Derives the AES-256 key from the master passphrase. The algorithm is
//! fixed by the on-disk format of existing vaults and must be reproduced
//! exactly for a returning user to decrypt their data:
//!
//! 1. salt = MD5(passphrase)
//! 2. stretched = PBKDF2-HMAC-SHA1(passphrase, salt, iterations, stretched_len)
//! 3. key = lowercase hex of MD5(stretched), used byte-for-byte as the key
//!
//! The passphrase-derived salt and the iteration count of 10 are known
//! weaknesses inherited from the original format. They stay the defaults
//! for compatibility; new, non-compatible deployments should use
//! [`KeyDerivationParams::hardened`].

use md5::{Digest, Md5};
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::secure_memory::Passphrase;

/// Length of the derived key in bytes: 32 hex characters of an MD5
/// digest, which is exactly an AES-256 key
pub const KEY_LENGTH: usize = 32;

/// Legacy iteration count, far below modern guidance but required for
/// compatibility with previously saved vaults
pub const LEGACY_ITERATIONS: u32 = 10;

/// Legacy PBKDF2 output length in bytes
pub const LEGACY_STRETCHED_LEN: usize = 4096;

/// Parameters for key derivation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDerivationParams {
    /// PBKDF2 iteration count
    pub iterations: u32,

    /// PBKDF2 output length in bytes before the final hash
    pub stretched_len: usize,
}

impl Default for KeyDerivationParams {
    fn default() -> Self {
        Self::legacy()
    }
}

impl KeyDerivationParams {
    /// Parameters matching the original vault format
    pub fn legacy() -> Self {
        Self {
            iterations: LEGACY_ITERATIONS,
            stretched_len: LEGACY_STRETCHED_LEN,
        }
    }

    /// Parameters for new, non-compatible vaults. Keys derived with these
    /// cannot decrypt vaults written with the legacy defaults.
    pub fn hardened() -> Self {
        Self {
            iterations: 600_000,
            stretched_len: LEGACY_STRETCHED_LEN,
        }
    }
}

/// A derived encryption key, zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive the symmetric key from a passphrase
///
/// Deterministic: the same passphrase and parameters always produce the
/// same key. There are no failure modes; an empty passphrase yields a
/// valid, if weak, key.
pub fn derive_key(passphrase: &Passphrase, params: &KeyDerivationParams) -> DerivedKey {
    let salt = Md5::digest(passphrase.as_bytes());

    let mut stretched = vec![0u8; params.stretched_len];
    pbkdf2_hmac::<Sha1>(
        passphrase.as_bytes(),
        salt.as_slice(),
        params.iterations,
        &mut stretched,
    );

    let mut digest = Md5::digest(&stretched);
    stretched.zeroize();

    let mut hex_key = hex::encode(&digest);
    digest.as_mut_slice().zeroize();

    let mut key = [0u8; KEY_LENGTH];
    key.copy_from_slice(hex_key.as_bytes());
    hex_key.zeroize();

    DerivedKey { key }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let passphrase = Passphrase::from("mySup3Rp@s$w0rd");
        let params = KeyDerivationParams::legacy();

        let key1 = derive_key(&passphrase, &params);
        let key2 = derive_key(&passphrase, &params);
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_known_answer_matches_existing_vault_format() {
        // Vector computed with the reference algorithm (MD5 salt,
        // PBKDF2-HMAC-SHA1, 10 iterations, 4096-byte stretch, hex of the
        // final MD5). A returning user's vault only opens if this holds.
        let key = derive_key(
            &Passphrase::from("mySup3Rp@s$w0rd"),
            &KeyDerivationParams::legacy(),
        );
        assert_eq!(key.as_bytes(), b"82691f2d37a722c9ed270006aead3277");
    }

    #[test]
    fn test_different_passphrases_different_keys() {
        let params = KeyDerivationParams::legacy();
        let key1 = derive_key(&Passphrase::from("passphrase-one"), &params);
        let key2 = derive_key(&Passphrase::from("passphrase-two"), &params);
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_empty_passphrase_yields_valid_key() {
        // Accepted by the format, weak by construction
        let key = derive_key(&Passphrase::from(""), &KeyDerivationParams::legacy());
        assert_eq!(key.as_bytes().len(), KEY_LENGTH);
    }

    #[test]
    fn test_key_is_lowercase_hex_ascii() {
        // The wire format uses the hex encoding of an MD5 digest as the
        // key bytes, so every byte must be an ASCII hex character
        let key = derive_key(
            &Passphrase::from("mySup3Rp@s$w0rd"),
            &KeyDerivationParams::legacy(),
        );
        for b in key.as_bytes() {
            assert!(b.is_ascii_hexdigit() && !b.is_ascii_uppercase());
        }
    }

    #[test]
    fn test_iteration_count_changes_key() {
        let passphrase = Passphrase::from("same-passphrase");
        let legacy = derive_key(&passphrase, &KeyDerivationParams::legacy());
        let hardened = derive_key(&passphrase, &KeyDerivationParams::hardened());
        assert_ne!(legacy.as_bytes(), hardened.as_bytes());
    }

    #[test]
    fn test_legacy_defaults() {
        // Interop contract with previously saved vaults; the salt derived
        // from the passphrase itself is an intentional reproduction of the
        // original scheme, not a recommendation
        let params = KeyDerivationParams::default();
        assert_eq!(params.iterations, 10);
        assert_eq!(params.stretched_len, 4096);
    }

    #[test]
    fn test_debug_redacts() {
        let key = derive_key(&Passphrase::from("secret"), &KeyDerivationParams::legacy());
        let debug = format!("{:?}", key);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&hex::encode(&key.as_bytes()[..4])));
    }
}
