//! Synchronization layer
//!
//! Composes the crypter and the remote object store: backup rotation of
//! the remote version chain, and the load/save orchestration the caller
//! talks to.

pub mod rotation;
pub mod store;

pub use rotation::{BackupRotator, RotationReport, RotationStep, StepOutcome};
pub use store::{LoadFallback, Loaded, SyncedVault};
