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

//! Content-addressable object database
//!
//! An [`ObjectDatabase`] stores byte strings under the hex digest of their
//! content. Writing the same bytes twice stores them once.
//!
//! # Examples
//!
//! ```
//! use gitlet_versioning::{ObjectDatabase, ObjectType, Oid};
//! use gitlet_storage::MockBackend;
//! use std::sync::Arc;
//!
//! # fn main() -> gitlet_versioning::VcsResult<()> {
//! let odb = ObjectDatabase::new(Arc::new(MockBackend::new()), ObjectType::Blob);
//!
//! let oid = odb.write(b"hello\n")?;
//! assert_eq!(oid, Oid::hash(b"hello\n"));
//! assert_eq!(odb.read(&oid)?, b"hello\n");
//! # Ok(())
//! # }
//! ```

use crate::{ObjectType, Oid, VcsError, VcsResult, OID_HEX_LEN};
use gitlet_storage::StorageBackend;
use std::sync::Arc;
use tracing::{debug, info};

/// Shortest abbreviated id accepted by [`ObjectDatabase::find_by_prefix`]
pub const MIN_PREFIX_LEN: usize = 4;

/// Content-addressable store for one kind of object
#[derive(Debug, Clone)]
pub struct ObjectDatabase {
    storage: Arc<dyn StorageBackend>,
    kind: ObjectType,
}

impl ObjectDatabase {
    /// Create an object database over the given backend
    ///
    /// The backend is expected to use the sharded layout; any backend works.
    pub fn new(storage: Arc<dyn StorageBackend>, kind: ObjectType) -> Self {
        debug!(kind = %kind, "Opening object database");
        ObjectDatabase { storage, kind }
    }

    /// Kind of object held by this database
    pub fn kind(&self) -> ObjectType {
        self.kind
    }

    /// Store `data` and return its digest
    ///
    /// Writing content that is already present is a no-op.
    pub fn write(&self, data: &[u8]) -> VcsResult<Oid> {
        let oid = Oid::hash(data);
        let key = oid.to_hex();

        if self.storage.exists(&key)? {
            debug!(oid = %oid, kind = %self.kind, "Object already exists (deduplicated)");
            return Ok(oid);
        }

        self.storage.put(&key, data)?;
        info!(oid = %oid, kind = %self.kind, size = data.len(), "Stored new object");
        Ok(oid)
    }

    /// Read the content stored under `oid`
    ///
    /// # Errors
    ///
    /// Returns [`VcsError::Storage`] with a not-found cause if the object
    /// is absent.
    pub fn read(&self, oid: &Oid) -> VcsResult<Vec<u8>> {
        debug!(oid = %oid, kind = %self.kind, "Reading object");
        Ok(self.storage.get(&oid.to_hex())?)
    }

    /// Check whether `oid` is stored
    pub fn exists(&self, oid: &Oid) -> VcsResult<bool> {
        Ok(self.storage.exists(&oid.to_hex())?)
    }

    /// Remove `oid` from the database
    pub fn delete(&self, oid: &Oid) -> VcsResult<()> {
        debug!(oid = %oid, kind = %self.kind, "Deleting object");
        Ok(self.storage.delete(&oid.to_hex())?)
    }

    /// Every stored id, in ascending hex order
    pub fn list(&self) -> VcsResult<Vec<Oid>> {
        self.list_with_prefix("")
    }

    /// Resolve an abbreviated id to the unique stored id it starts
    ///
    /// Matching is case-insensitive. Returns `Ok(None)` if the prefix is
    /// shorter than [`MIN_PREFIX_LEN`], is not hex, matches nothing, or
    /// matches more than one object.
    pub fn find_by_prefix(&self, prefix: &str) -> VcsResult<Option<Oid>> {
        if prefix.len() < MIN_PREFIX_LEN || !Oid::is_hex_prefix(prefix) {
            return Ok(None);
        }

        let prefix = prefix.to_ascii_lowercase();
        let mut matches = self.list_with_prefix(&prefix)?;
        match matches.len() {
            1 => Ok(matches.pop()),
            0 => Ok(None),
            n => {
                debug!(prefix = %prefix, matches = n, "Ambiguous object prefix");
                Ok(None)
            }
        }
    }

    fn list_with_prefix(&self, prefix: &str) -> VcsResult<Vec<Oid>> {
        self.storage
            .list_objects(prefix)?
            .into_iter()
            .filter(|key| key.len() == OID_HEX_LEN)
            .map(|key| {
                Oid::from_hex(&key).map_err(|e| {
                    VcsError::corrupt(format!("{} store holds bad key {}: {}", self.kind, key, e))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitlet_storage::MockBackend;

    fn blob_db() -> (MockBackend, ObjectDatabase) {
        let storage = MockBackend::new();
        let odb = ObjectDatabase::new(Arc::new(storage.clone()), ObjectType::Blob);
        (storage, odb)
    }

    #[test]
    fn test_write_and_read() {
        let (_, odb) = blob_db();
        let oid = odb.write(b"test data").unwrap();
        assert_eq!(odb.read(&oid).unwrap(), b"test data");
    }

    #[test]
    fn test_deduplication() {
        let (storage, odb) = blob_db();
        let first = odb.write(b"same").unwrap();
        let second = odb.write(b"same").unwrap();
        assert_eq!(first, second);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_empty_content() {
        let (_, odb) = blob_db();
        let oid = odb.write(b"").unwrap();
        assert_eq!(odb.read(&oid).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_read_missing() {
        let (_, odb) = blob_db();
        let err = odb.read(&Oid::hash(b"nope")).unwrap_err();
        assert!(matches!(err, VcsError::Storage(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_exists_and_delete() {
        let (_, odb) = blob_db();
        let oid = odb.write(b"x").unwrap();
        assert!(odb.exists(&oid).unwrap());
        odb.delete(&oid).unwrap();
        assert!(!odb.exists(&oid).unwrap());
    }

    #[test]
    fn test_list_sorted() {
        let (_, odb) = blob_db();
        let mut written: Vec<Oid> = ["a", "b", "c", "d"]
            .iter()
            .map(|s| odb.write(s.as_bytes()).unwrap())
            .collect();
        written.sort();
        assert_eq!(odb.list().unwrap(), written);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_, odb) = blob_db();
        let oid = odb.write(b"prefix me").unwrap();
        let hex = oid.to_hex();

        assert_eq!(odb.find_by_prefix(&hex[..4]).unwrap(), Some(oid));
        assert_eq!(odb.find_by_prefix(&hex[..10].to_uppercase()).unwrap(), Some(oid));
        assert_eq!(odb.find_by_prefix(&hex).unwrap(), Some(oid));
        assert_eq!(odb.find_by_prefix(&hex[..3]).unwrap(), None);
        assert_eq!(odb.find_by_prefix("zzzz").unwrap(), None);
    }

    #[test]
    fn test_find_by_prefix_ambiguous() {
        let storage = MockBackend::new();
        let a = format!("abcd{}", "0".repeat(60));
        let b = format!("abcd{}", "1".repeat(60));
        storage.put(&a, b"1").unwrap();
        storage.put(&b, b"2").unwrap();
        let odb = ObjectDatabase::new(Arc::new(storage), ObjectType::Commit);

        assert_eq!(odb.find_by_prefix("abcd").unwrap(), None);
        assert_eq!(
            odb.find_by_prefix("abcd1").unwrap(),
            Some(Oid::from_hex(&b).unwrap())
        );
    }
}
