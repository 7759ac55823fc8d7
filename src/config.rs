//! Synchronization settings for credvault
//!
//! Holds the remote layout choices: where the primary vault object lives
//! and how many rotated backups are kept next to it.

use serde::{Deserialize, Serialize};

/// Default remote path of the primary vault object
pub const DEFAULT_REMOTE_PATH: &str = "/db.bin";

/// Default number of rotated backup generations to keep
pub const DEFAULT_MAX_BACKUPS: u32 = 5;

/// Settings for the synchronized vault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    /// Remote path of the primary vault object
    #[serde(default = "default_remote_path")]
    pub remote_path: String,

    /// Maximum backup depth: backups live at `<remote_path>.1` through
    /// `<remote_path>.<max_backups>`, oldest at the highest index
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
}

fn default_remote_path() -> String {
    DEFAULT_REMOTE_PATH.to_string()
}

fn default_max_backups() -> u32 {
    DEFAULT_MAX_BACKUPS
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            remote_path: default_remote_path(),
            max_backups: default_max_backups(),
        }
    }
}

impl SyncSettings {
    /// Create settings for a custom remote path, keeping the default depth
    pub fn with_remote_path(remote_path: impl Into<String>) -> Self {
        Self {
            remote_path: remote_path.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SyncSettings::default();
        assert_eq!(settings.remote_path, "/db.bin");
        assert_eq!(settings.max_backups, 5);
    }

    #[test]
    fn test_missing_fields_filled_from_defaults() {
        let settings: SyncSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.remote_path, DEFAULT_REMOTE_PATH);
        assert_eq!(settings.max_backups, DEFAULT_MAX_BACKUPS);
    }

    #[test]
    fn test_with_remote_path() {
        let settings = SyncSettings::with_remote_path("/vault.bin");
        assert_eq!(settings.remote_path, "/vault.bin");
        assert_eq!(settings.max_backups, DEFAULT_MAX_BACKUPS);
    }

    #[test]
    fn test_round_trip() {
        let settings = SyncSettings {
            remote_path: "/secrets.bin".into(),
            max_backups: 3,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: SyncSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.remote_path, settings.remote_path);
        assert_eq!(parsed.max_backups, settings.max_backups);
    }
}
