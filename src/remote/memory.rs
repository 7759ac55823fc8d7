//! In-memory object store
//!
//! A `HashMap`-backed [`ObjectStore`] used to exercise the rotation and
//! load/save logic without a network. Individual operations can be made
//! to fail to simulate transport errors.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{ObjectStore, RemoteError};

/// An in-memory remote object store with injectable failures
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    failing_renames: Mutex<HashSet<String>>,
    fail_puts: Mutex<bool>,
    fail_fetches: Mutex<bool>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an object directly, bypassing the trait
    pub fn insert(&self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.objects.lock().unwrap().insert(path.into(), data.into());
    }

    /// Read an object directly, bypassing the trait
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Check if the store holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }

    /// Make every rename whose source is `src` fail with a 500
    pub fn fail_rename_from(&self, src: impl Into<String>) {
        self.failing_renames.lock().unwrap().insert(src.into());
    }

    /// Make every put fail with a 500
    pub fn fail_puts(&self) {
        *self.fail_puts.lock().unwrap() = true;
    }

    /// Make every fetch fail with a 500
    pub fn fail_fetches(&self) {
        *self.fail_fetches.lock().unwrap() = true;
    }
}

impl ObjectStore for MemoryStore {
    fn exists(&self, path: &str) -> Result<bool, RemoteError> {
        Ok(self.objects.lock().unwrap().contains_key(path))
    }

    fn rename(&self, src: &str, dst: &str) -> Result<(), RemoteError> {
        if self.failing_renames.lock().unwrap().contains(src) {
            return Err(RemoteError::status(500, "injected rename failure"));
        }

        let mut objects = self.objects.lock().unwrap();
        match objects.remove(src) {
            Some(data) => {
                objects.insert(dst.to_string(), data);
                Ok(())
            }
            None => Err(RemoteError::status(404, format!("no such object: {src}"))),
        }
    }

    fn fetch(&self, path: &str) -> Result<Vec<u8>, RemoteError> {
        if *self.fail_fetches.lock().unwrap() {
            return Err(RemoteError::status(500, "injected fetch failure"));
        }

        self.objects
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| RemoteError::status(404, format!("no such object: {path}")))
    }

    fn put(&self, path: &str, data: &[u8]) -> Result<(), RemoteError> {
        if *self.fail_puts.lock().unwrap() {
            return Err(RemoteError::status(500, "injected put failure"));
        }

        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }
}
