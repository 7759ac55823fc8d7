//! Cryptographic functions for credvault
//!
//! Provides AES-256-GCM authenticated encryption behind the [`Crypter`]
//! trait, and the legacy-compatible passphrase key derivation used by
//! existing vaults.

pub mod encryption;
pub mod key_derivation;
pub mod secure_memory;

pub use encryption::{AesGcmCrypter, Crypter, NONCE_SIZE};
pub use key_derivation::{derive_key, DerivedKey, KeyDerivationParams};
pub use secure_memory::Passphrase;
