//! Remote object store interface
//!
//! The vault is persisted to a remote object store reached over an
//! authenticated channel. The synchronization layer depends only on the
//! [`ObjectStore`] trait; [`disk::DiskStore`] talks to the real cloud
//! disk API and [`memory::MemoryStore`] backs the tests.

pub mod disk;
pub mod memory;

use thiserror::Error;

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// Errors reported by a remote object store
///
/// The core distinguishes two response codes: 404 is treated as "no prior
/// vault" on load, 403 is surfaced distinctly so callers can prompt for
/// re-authentication. Everything else is opaque.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The remote answered with a non-success response code
    #[error("Unsuccessful response code {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response (connection, TLS, protocol)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl RemoteError {
    /// Create an error from a response code and body
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Create a transport-level error
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// Check if the remote reported the object as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Check if the remote refused the credentials
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Status { status: 403, .. })
    }
}

/// A minimal remote object store capability
///
/// All operations are blocking point-to-point calls. `rename` and `put`
/// overwrite an existing destination.
pub trait ObjectStore {
    /// Check whether an object exists at `path`
    fn exists(&self, path: &str) -> Result<bool, RemoteError>;

    /// Move an object, overwriting the destination. Errors if the source
    /// is missing; callers that tolerate a missing source check
    /// [`ObjectStore::exists`] first.
    fn rename(&self, src: &str, dst: &str) -> Result<(), RemoteError>;

    /// Download the contents of an object
    fn fetch(&self, path: &str) -> Result<Vec<u8>, RemoteError>;

    /// Upload an object, overwriting any existing content
    fn put(&self, path: &str, data: &[u8]) -> Result<(), RemoteError>;
}

impl<T: ObjectStore + ?Sized> ObjectStore for &T {
    fn exists(&self, path: &str) -> Result<bool, RemoteError> {
        (**self).exists(path)
    }

    fn rename(&self, src: &str, dst: &str) -> Result<(), RemoteError> {
        (**self).rename(src, dst)
    }

    fn fetch(&self, path: &str) -> Result<Vec<u8>, RemoteError> {
        (**self).fetch(path)
    }

    fn put(&self, path: &str, data: &[u8]) -> Result<(), RemoteError> {
        (**self).put(path, data)
    }
}
