//! Load/save orchestration for the synchronized vault
//!
//! `SyncedVault` is what the command layer talks to. Load runs
//! fetch -> decrypt -> deserialize, save runs serialize -> encrypt ->
//! rotate -> upload. This is the only layer allowed to reclassify a
//! failure's severity: a missing remote object becomes a first-run empty
//! vault, a decryptable-but-corrupted document becomes an empty vault
//! with a warning, and rotation failures never block the upload.

use tracing::{debug, info, warn};

use crate::config::SyncSettings;
use crate::crypto::Crypter;
use crate::error::VaultResult;
use crate::models::VaultDocument;
use crate::remote::ObjectStore;

use super::rotation::{BackupRotator, RotationReport};

/// How a degraded load produced its empty document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFallback {
    /// No remote vault exists yet; first-run bootstrap
    MissingRemote,
    /// The remote vault decrypted but its contents were not a valid
    /// document; the rotated backups still hold the last good version
    CorruptedDocument,
}

/// The result of a successful load
#[derive(Debug)]
pub struct Loaded {
    /// The vault document, possibly substituted empty
    pub document: VaultDocument,
    /// Set when the document was substituted rather than read
    pub fallback: Option<LoadFallback>,
}

/// The encrypted vault synchronized to a remote object store
pub struct SyncedVault<S: ObjectStore> {
    store: S,
    crypter: Box<dyn Crypter>,
    settings: SyncSettings,
}

impl<S: ObjectStore> SyncedVault<S> {
    /// Create a vault over a remote store and a crypter
    pub fn new(store: S, crypter: Box<dyn Crypter>, settings: SyncSettings) -> Self {
        Self {
            store,
            crypter,
            settings,
        }
    }

    /// The settings this vault was created with
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Load the current vault from the remote store
    ///
    /// A missing remote object is not an error: the vault starts empty.
    /// An authentication failure is fatal and almost always means the
    /// wrong master passphrase. A document that decrypts but does not
    /// parse degrades to an empty vault with a warning.
    pub fn load(&self) -> VaultResult<Loaded> {
        let path = &self.settings.remote_path;

        let blob = match self.store.fetch(path) {
            Ok(blob) => blob,
            Err(e) if e.is_not_found() => {
                info!(%path, "no previous vault found, initializing empty");
                return Ok(Loaded {
                    document: VaultDocument::new(),
                    fallback: Some(LoadFallback::MissingRemote),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let plaintext = self.crypter.decrypt(&blob)?;

        match serde_json::from_slice(&plaintext) {
            Ok(document) => {
                debug!(%path, "vault loaded");
                Ok(Loaded {
                    document,
                    fallback: None,
                })
            }
            Err(e) => {
                warn!(%path, error = %e,
                    "vault decrypted but the content is corrupted, initializing empty");
                Ok(Loaded {
                    document: VaultDocument::new(),
                    fallback: Some(LoadFallback::CorruptedDocument),
                })
            }
        }
    }

    /// Save a new version of the vault to the remote store
    ///
    /// Serialization and encryption failures abort before the remote is
    /// touched. Backup rotation runs best-effort; its report is returned
    /// so callers can surface partial failures. The upload itself is
    /// fatal on failure since it writes the only durable copy.
    pub fn save(&self, document: &VaultDocument) -> VaultResult<RotationReport> {
        let path = &self.settings.remote_path;

        let plaintext = serde_json::to_vec(document)?;
        let blob = self.crypter.encrypt(&plaintext)?;

        let report =
            BackupRotator::new(&self.store, path, self.settings.max_backups).rotate();
        if !report.is_clean() {
            warn!(
                failed = report.failed_steps().len(),
                "some backup shifts failed, saving anyway"
            );
        }

        self.store.put(path, &blob)?;
        info!(%path, bytes = blob.len(), "vault saved");

        Ok(report)
    }
}
