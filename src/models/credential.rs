//! Credential record and vault document
//!
//! The vault document is a mapping from service name to a credential
//! record. The service name is the unique key; insertion order carries no
//! meaning. The JSON field names are part of the wire format shared with
//! previously saved vaults and must not change.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// All the data kept for one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Service name, duplicated from the document key
    pub name: String,

    /// Login name for the service
    pub username: String,

    /// The secret itself
    pub password: String,

    /// Free-form note
    #[serde(default)]
    pub comment: String,

    /// Last-modified timestamp, kept as a string for wire compatibility
    pub updated_at: String,

    /// Service URL
    #[serde(default)]
    pub url: String,
}

impl Credential {
    /// Create a new credential stamped with the current time
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            comment: String::new(),
            updated_at: now_stamp(),
            url: String::new(),
        }
    }

    /// Refresh the last-modified timestamp
    pub fn touch(&mut self) {
        self.updated_at = now_stamp();
    }
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339()
}

/// The serialized vault: service name -> credential record
pub type VaultDocument = HashMap<String, Credential>;
