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

//! Storage abstraction layer for Gitlet
//!
//! Everything gitlet persists (blobs, commits, branch pointers, the staging
//! records and the commit graph) goes through the [`StorageBackend`] trait:
//!
//! - [`LocalBackend`] stores entries on the local filesystem, either
//!   *sharded* (`ab/cdef...`, used for content-addressed objects) or *flat*
//!   (the key is the relative path, used for repository metadata)
//! - [`mock::MockBackend`] keeps everything in memory for tests
//!
//! # Core Concepts
//!
//! - **Keys**: non-empty strings, `/`-separated for flat backends
//! - **Entries**: arbitrary bytes
//! - **Prefixes**: plain string prefixes used for listing (e.g. every branch
//!   under `branches/`, or every object id starting with `3fa2`)
//!
//! Execution is synchronous and single-threaded; a command opens its
//! backends, does its work, and exits.
//!
//! # Examples
//!
//! ```
//! use gitlet_storage::{StorageBackend, mock::MockBackend};
//!
//! # fn main() -> gitlet_storage::StorageResult<()> {
//! let storage = MockBackend::new();
//!
//! storage.put("branches/master", b"3fa2...")?;
//! assert_eq!(storage.get("branches/master")?, b"3fa2...");
//!
//! let branches = storage.list_objects("branches/")?;
//! assert_eq!(branches, vec!["branches/master".to_string()]);
//!
//! storage.delete("branches/master")?;
//! assert!(!storage.exists("branches/master")?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod local;
pub mod mock;

use std::fmt::Debug;

pub use error::{StorageError, StorageResult};
pub use local::{LocalBackend, Layout};
pub use mock::MockBackend;

/// Key/value storage used by every gitlet store
///
/// Implementations must:
/// - reject empty keys with [`StorageError::InvalidKey`]
/// - report a missing key from `get` as [`StorageError::NotFound`]
/// - treat `put` as overwrite and `delete` of a missing key as success
/// - return `list_objects` results sorted
///
/// See [`mock::MockBackend`] for a complete implementation.
pub trait StorageBackend: Send + Sync + Debug {
    /// Retrieve the bytes stored under `key`
    ///
    /// # Errors
    ///
    /// - [`StorageError::NotFound`] if nothing is stored under the key
    /// - [`StorageError::InvalidKey`] if the key is empty
    /// - [`StorageError::Io`] on filesystem failure
    fn get(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Store `data` under `key`, replacing any previous entry
    fn put(&self, key: &str, data: &[u8]) -> StorageResult<()>;

    /// Check whether an entry exists
    fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Delete an entry; deleting a missing key succeeds
    fn delete(&self, key: &str) -> StorageResult<()>;

    /// List every key starting with `prefix`, sorted
    ///
    /// An empty prefix lists everything; no match yields an empty vec.
    ///
    /// ```
    /// # use gitlet_storage::{StorageBackend, mock::MockBackend};
    /// # fn main() -> gitlet_storage::StorageResult<()> {
    /// let storage = MockBackend::new();
    /// storage.put("3fa2c1", b"one")?;
    /// storage.put("3fa2d4", b"two")?;
    /// storage.put("7b00aa", b"three")?;
    ///
    /// assert_eq!(storage.list_objects("3fa2")?.len(), 2);
    /// assert_eq!(storage.list_objects("")?.len(), 3);
    /// # Ok(())
    /// # }
    /// ```
    fn list_objects(&self, prefix: &str) -> StorageResult<Vec<String>>;
}

pub(crate) fn check_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::invalid_key("key cannot be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_object_safe() {
        fn _check_object_safe(_: &dyn StorageBackend) {}
    }

    #[test]
    fn empty_key_rejected() {
        assert!(check_key("").unwrap_err().is_invalid_key());
        assert!(check_key("HEAD").is_ok());
    }
}
