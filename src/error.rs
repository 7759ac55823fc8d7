//! Custom error types for credvault
//!
//! This module defines the error hierarchy for the vault using thiserror
//! for ergonomic error definitions. Severity is decided by the caller:
//! the synced store is the only layer allowed to downgrade a failure
//! (e.g. treating a missing remote object as an empty vault).

use thiserror::Error;

use crate::remote::RemoteError;

/// The main error type for vault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// The secure random source could not produce a nonce (fatal, non-retryable)
    #[error("Random source error: {0}")]
    Random(String),

    /// A ciphertext blob is too short to contain a nonce
    #[error("Malformed ciphertext: {len} bytes, need at least {min}")]
    MalformedCiphertext { len: usize, min: usize },

    /// Tag verification failed: wrong key, corrupted data, or tampering.
    /// Deliberately carries no further detail.
    #[error("Authentication failed: wrong key or corrupted data")]
    Authentication,

    /// Sealing failed inside the cipher (fatal, like a random-source
    /// failure, but says nothing about the host environment)
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Document serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Remote object store errors
    #[error("Remote store error: {0}")]
    Remote(#[from] RemoteError),
}

impl VaultError {
    /// Check if this is an authentication (wrong passphrase / tamper) error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Check if this is a remote "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Remote(e) if e.is_not_found())
    }

    /// Check if this is a remote "forbidden" error, usually meaning the
    /// bearer token has expired and the caller should re-authenticate
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Remote(e) if e.is_forbidden())
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for vault operations
pub type VaultResult<T> = Result<T, VaultError>;
