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

use crate::{Oid, VcsResult};
use gitlet_storage::StorageBackend;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Metadata key of the staged additions record
pub const ADDED_KEY: &str = "staging/added";

/// Metadata key of the staged removals record
pub const REMOVED_KEY: &str = "staging/removed";

/// The staging area
///
/// Tracks files staged for addition (with the digest of the staged content)
/// and files staged for removal. A path is never in both sets. Persisted as
/// two JSON records in the metadata store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingArea {
    added: BTreeMap<String, Oid>,
    removed: BTreeSet<String>,
}

impl StagingArea {
    /// Create a new empty staging area
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the staging area from the metadata store
    ///
    /// Missing records read as empty.
    pub fn load(meta: &dyn StorageBackend) -> VcsResult<Self> {
        let added = match meta.get(ADDED_KEY) {
            Ok(data) => serde_json::from_slice(&data)?,
            Err(e) if e.is_not_found() => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        let removed = match meta.get(REMOVED_KEY) {
            Ok(data) => serde_json::from_slice(&data)?,
            Err(e) if e.is_not_found() => BTreeSet::new(),
            Err(e) => return Err(e.into()),
        };

        let staging = Self { added, removed };
        debug!(
            added = staging.added.len(),
            removed = staging.removed.len(),
            "Loaded staging area"
        );
        Ok(staging)
    }

    /// Save the staging area to the metadata store
    pub fn save(&self, meta: &dyn StorageBackend) -> VcsResult<()> {
        meta.put(ADDED_KEY, &serde_json::to_vec(&self.added)?)?;
        meta.put(REMOVED_KEY, &serde_json::to_vec(&self.removed)?)?;
        Ok(())
    }

    /// Stage `path` for addition with content `oid`
    ///
    /// Clears any pending removal of the same path.
    pub fn stage_addition(&mut self, path: impl Into<String>, oid: Oid) {
        let path = path.into();
        self.removed.remove(&path);
        self.added.insert(path, oid);
    }

    /// Stage `path` for removal
    ///
    /// Clears any pending addition of the same path.
    pub fn stage_removal(&mut self, path: impl Into<String>) {
        let path = path.into();
        self.added.remove(&path);
        self.removed.insert(path);
    }

    /// Drop a pending addition, returning its digest
    pub fn unstage_addition(&mut self, path: &str) -> Option<Oid> {
        self.added.remove(path)
    }

    /// Drop a pending removal
    pub fn unstage_removal(&mut self, path: &str) -> bool {
        self.removed.remove(path)
    }

    /// Digest staged for `path`
    pub fn added(&self, path: &str) -> Option<&Oid> {
        self.added.get(path)
    }

    /// Check if `path` is staged for removal
    pub fn is_removed(&self, path: &str) -> bool {
        self.removed.contains(path)
    }

    /// Staged additions, sorted by path
    pub fn additions(&self) -> &BTreeMap<String, Oid> {
        &self.added
    }

    /// Staged removals, sorted
    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removed
    }

    /// Number of staged additions and removals
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    /// Check if nothing is staged
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Clear all staged changes
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitlet_storage::MockBackend;

    #[test]
    fn test_addition_and_removal_exclusive() {
        let mut staging = StagingArea::new();
        staging.stage_addition("a.txt", Oid::hash(b"a"));
        staging.stage_removal("a.txt");
        assert!(staging.added("a.txt").is_none());
        assert!(staging.is_removed("a.txt"));

        staging.stage_addition("a.txt", Oid::hash(b"a"));
        assert!(!staging.is_removed("a.txt"));
        assert_eq!(staging.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut staging = StagingArea::new();
        staging.stage_addition("a.txt", Oid::hash(b"a"));
        staging.stage_removal("b.txt");
        assert!(!staging.is_empty());
        staging.clear();
        assert!(staging.is_empty());
    }

    #[test]
    fn test_load_missing_is_empty() {
        let meta = MockBackend::new();
        assert!(StagingArea::load(&meta).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let meta = MockBackend::new();
        let mut staging = StagingArea::new();
        staging.stage_addition("b.txt", Oid::hash(b"b"));
        staging.stage_addition("a.txt", Oid::hash(b"a"));
        staging.stage_removal("c.txt");
        staging.save(&meta).unwrap();

        let loaded = StagingArea::load(&meta).unwrap();
        assert_eq!(loaded, staging);
        assert_eq!(
            loaded.additions().keys().collect::<Vec<_>>(),
            vec!["a.txt", "b.txt"]
        );
    }

    #[test]
    fn test_records_are_json() {
        let meta = MockBackend::new();
        let mut staging = StagingArea::new();
        staging.stage_removal("gone.txt");
        staging.save(&meta).unwrap();

        assert_eq!(meta.get(REMOVED_KEY).unwrap(), br#"["gone.txt"]"#);
        assert_eq!(meta.get(ADDED_KEY).unwrap(), b"{}");
    }

    #[test]
    fn test_corrupt_record() {
        let meta = MockBackend::new();
        meta.put(ADDED_KEY, b"[1,2").unwrap();
        assert!(StagingArea::load(&meta).is_err());
    }
}
