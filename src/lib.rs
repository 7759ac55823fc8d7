//! credvault - Encrypted credential vault synchronized to a remote object store
//!
//! This library keeps a mapping of service names to login secrets encrypted
//! at rest and mirrored to a remote object store, with prior versions
//! preserved through backup rotation.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Synchronization settings (remote path, backup depth)
//! - `error`: Custom error types
//! - `models`: The credential record and the vault document map
//! - `crypto`: Passphrase key derivation and authenticated encryption
//! - `remote`: The remote object store interface and its backends
//! - `sync`: Backup rotation and the load/save orchestration
//!
//! # Example
//!
//! ```rust,ignore
//! use credvault::crypto::{derive_key, AesGcmCrypter, KeyDerivationParams, Passphrase};
//! use credvault::remote::DiskStore;
//! use credvault::sync::SyncedVault;
//!
//! let passphrase = Passphrase::from("master password");
//! let key = derive_key(&passphrase, &KeyDerivationParams::default());
//! let store = DiskStore::new(access_token)?;
//! let vault = SyncedVault::new(store, Box::new(AesGcmCrypter::new(&key)), Default::default());
//! let loaded = vault.load()?;
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod models;
pub mod remote;
pub mod sync;

pub use error::{VaultError, VaultResult};
