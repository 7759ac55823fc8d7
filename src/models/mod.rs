//! Core data models for credvault
//!
//! This module contains the credential record and the vault document, the
//! plaintext structure that gets serialized, encrypted and synchronized.

pub mod credential;

pub use credential::{Credential, VaultDocument};
