//! Secure memory handling for sensitive data
//!
//! The passphrase is supplied once per process and must never be
//! persisted or logged. This type zeroes its contents on drop and keeps
//! the bytes out of `Debug`/`Display` output.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A passphrase held in memory, zeroized on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Passphrase {
    inner: Vec<u8>,
}

impl Passphrase {
    /// Create a new passphrase from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: bytes.into(),
        }
    }

    /// Get the passphrase bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty. An empty passphrase is permitted and derives a
    /// valid, if weak, key.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for Passphrase {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<&str> for Passphrase {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Passphrase {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

// Don't print the contents in Debug output
impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Passphrase")
            .field("len", &self.inner.len())
            .finish()
    }
}

// Don't print the contents in Display output
impl fmt::Display for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED {} bytes]", self.inner.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation() {
        let p = Passphrase::from("secret");
        assert_eq!(p.as_bytes(), b"secret");
        assert_eq!(p.len(), 6);
        assert!(!p.is_empty());
    }

    #[test]
    fn test_empty_allowed() {
        let p = Passphrase::from("");
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
    }

    #[test]
    fn test_from_string() {
        let p: Passphrase = String::from("secret").into();
        assert_eq!(p.as_bytes(), b"secret");
    }

    #[test]
    fn test_from_bytes() {
        let p: Passphrase = vec![1u8, 2, 3].into();
        assert_eq!(p.as_bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_debug_redacts() {
        let p = Passphrase::from("secret");
        let debug = format!("{:?}", p);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("Passphrase"));
    }

    #[test]
    fn test_display_redacts() {
        let p = Passphrase::from("secret");
        let display = format!("{}", p);
        assert!(!display.contains("secret"));
        assert!(display.contains("REDACTED"));
    }
}
