// Gitlet - Local Version Control
// Copyright (C) 2025 Gitlet Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! In-memory mock storage backend for testing
//!
//! Clones share the same underlying map, so a test can hand one clone to a
//! repository and inspect the other afterwards.
//!
//! ```
//! use gitlet_storage::{StorageBackend, mock::MockBackend};
//!
//! # fn main() -> gitlet_storage::StorageResult<()> {
//! let storage = MockBackend::new();
//! let view = storage.clone();
//!
//! storage.put("HEAD", b"master")?;
//! assert_eq!(view.get("HEAD")?, b"master");
//! assert_eq!(view.len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::{check_key, StorageBackend, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Store = BTreeMap<String, Vec<u8>>;

/// In-memory storage backend
#[derive(Clone)]
pub struct MockBackend {
    store: Arc<RwLock<Store>>,
}

impl MockBackend {
    /// Create a new empty mock storage backend
    pub fn new() -> Self {
        MockBackend {
            store: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Create a mock storage backend with initial data
    pub fn with_data(initial_data: impl IntoIterator<Item = (String, Vec<u8>)>) -> Self {
        MockBackend {
            store: Arc::new(RwLock::new(initial_data.into_iter().collect())),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry
    pub fn clear(&self) {
        if let Ok(mut store) = self.write() {
            store.clear();
        }
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        self.read()
            .map(|s| s.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Store>> {
        self.store
            .read()
            .map_err(|_| StorageError::backend("mock store lock poisoned"))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Store>> {
        self.store
            .write()
            .map_err(|_| StorageError::backend("mock store lock poisoned"))
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockBackend")
            .field("entries", &self.len())
            .finish()
    }
}

impl StorageBackend for MockBackend {
    fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        check_key(key)?;
        self.read()?
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key))
    }

    fn put(&self, key: &str, data: &[u8]) -> StorageResult<()> {
        check_key(key)?;
        self.write()?.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        check_key(key)?;
        Ok(self.read()?.contains_key(key))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        check_key(key)?;
        self.write()?.remove(key);
        Ok(())
    }

    fn list_objects(&self, prefix: &str) -> StorageResult<Vec<String>> {
        Ok(self
            .read()?
            .range(prefix.to_string()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect())
    }
}
