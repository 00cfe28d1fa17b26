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

//! Branch pointers and HEAD
//!
//! A branch is a named pointer to a commit, stored as `branches/<name>`
//! holding the hex id. `HEAD` holds the name of the active branch; it never
//! points at a commit directly.

use crate::{Oid, VcsError, VcsResult};
use gitlet_storage::StorageBackend;
use std::collections::BTreeMap;
use tracing::debug;

/// Metadata key holding the active branch name
pub const HEAD_KEY: &str = "HEAD";

/// Metadata key prefix of branch pointers
pub const BRANCHES_PREFIX: &str = "branches/";

/// Name of the branch created by `init`
pub const DEFAULT_BRANCH: &str = "master";

/// Check that `name` can be used as a branch name
///
/// Names must be non-empty and free of path separators, since each branch is
/// stored as a single entry.
///
/// ```
/// use gitlet_versioning::refs::validate_branch_name;
///
/// assert!(validate_branch_name("feature-x").is_ok());
/// assert!(validate_branch_name("").is_err());
/// assert!(validate_branch_name("a/b").is_err());
/// ```
pub fn validate_branch_name(name: &str) -> VcsResult<()> {
    if name.is_empty()
        || name.contains(['/', '\\'])
        || name == "."
        || name == ".."
        || name.chars().any(char::is_control)
    {
        return Err(VcsError::InvalidArguments);
    }
    Ok(())
}

/// Branch table plus the active branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refs {
    head: String,
    branches: BTreeMap<String, Oid>,
}

impl Refs {
    /// Refs of a fresh repository: one default branch at `root`
    pub fn new(root: Oid) -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(DEFAULT_BRANCH.to_string(), root);
        Self {
            head: DEFAULT_BRANCH.to_string(),
            branches,
        }
    }

    /// Load HEAD and every branch from the metadata store
    ///
    /// # Errors
    ///
    /// [`VcsError::Corrupt`] if HEAD names a missing branch or a branch
    /// holds an invalid id.
    pub fn load(meta: &dyn StorageBackend) -> VcsResult<Self> {
        let head = String::from_utf8(meta.get(HEAD_KEY)?)
            .map_err(|_| VcsError::corrupt("HEAD is not valid UTF-8"))?;

        let mut branches = BTreeMap::new();
        for key in meta.list_objects(BRANCHES_PREFIX)? {
            let name = &key[BRANCHES_PREFIX.len()..];
            let raw = meta.get(&key)?;
            let hex = std::str::from_utf8(&raw)
                .map_err(|_| VcsError::corrupt(format!("branch {} is not valid UTF-8", name)))?;
            let oid = Oid::from_hex(hex.trim())
                .map_err(|e| VcsError::corrupt(format!("branch {}: {}", name, e)))?;
            branches.insert(name.to_string(), oid);
        }

        if !branches.contains_key(&head) {
            return Err(VcsError::corrupt(format!("HEAD names missing branch {}", head)));
        }

        debug!(head = %head, branches = branches.len(), "Loaded refs");
        Ok(Self { head, branches })
    }

    /// Write HEAD and the branch table, removing deleted branches
    pub fn save(&self, meta: &dyn StorageBackend) -> VcsResult<()> {
        for key in meta.list_objects(BRANCHES_PREFIX)? {
            if !self.branches.contains_key(&key[BRANCHES_PREFIX.len()..]) {
                meta.delete(&key)?;
            }
        }
        for (name, oid) in &self.branches {
            meta.put(&Self::branch_key(name), oid.to_hex().as_bytes())?;
        }
        meta.put(HEAD_KEY, self.head.as_bytes())?;
        Ok(())
    }

    /// Name of the active branch
    pub fn head(&self) -> &str {
        &self.head
    }

    /// Commit the active branch points to
    pub fn head_commit(&self) -> VcsResult<Oid> {
        self.get(&self.head)
            .ok_or_else(|| VcsError::corrupt(format!("HEAD names missing branch {}", self.head)))
    }

    /// Commit a branch points to
    pub fn get(&self, name: &str) -> Option<Oid> {
        self.branches.get(name).copied()
    }

    /// Check whether a branch exists
    pub fn contains(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    /// Branch names with their commits, sorted by name
    pub fn branches(&self) -> &BTreeMap<String, Oid> {
        &self.branches
    }

    /// Create a branch
    pub fn create(&mut self, name: &str, oid: Oid) -> VcsResult<()> {
        validate_branch_name(name)?;
        if self.branches.contains_key(name) {
            return Err(VcsError::BranchAlreadyExists(name.to_string()));
        }
        self.branches.insert(name.to_string(), oid);
        Ok(())
    }

    /// Delete a branch (never the active one)
    pub fn remove(&mut self, name: &str) -> VcsResult<()> {
        if !self.branches.contains_key(name) {
            return Err(VcsError::BranchNotFound(name.to_string()));
        }
        if name == self.head {
            return Err(VcsError::CannotRemoveActiveBranch);
        }
        self.branches.remove(name);
        Ok(())
    }

    /// Point the active branch at `oid`
    pub fn advance_head(&mut self, oid: Oid) {
        self.branches.insert(self.head.clone(), oid);
    }

    /// Make `name` the active branch
    pub fn set_head(&mut self, name: &str) -> VcsResult<()> {
        if !self.branches.contains_key(name) {
            return Err(VcsError::NoSuchBranch(name.to_string()));
        }
        self.head = name.to_string();
        Ok(())
    }

    fn branch_key(name: &str) -> String {
        format!("{}{}", BRANCHES_PREFIX, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitlet_storage::MockBackend;

    #[test]
    fn test_new_has_master() {
        let root = Oid::hash(b"root");
        let refs = Refs::new(root);
        assert_eq!(refs.head(), "master");
        assert_eq!(refs.head_commit().unwrap(), root);
    }

    #[test]
    fn test_create_and_remove() {
        let root = Oid::hash(b"root");
        let mut refs = Refs::new(root);
        refs.create("dev", root).unwrap();
        assert!(matches!(
            refs.create("dev", root),
            Err(VcsError::BranchAlreadyExists(_))
        ));
        assert!(matches!(
            refs.remove("master"),
            Err(VcsError::CannotRemoveActiveBranch)
        ));
        refs.remove("dev").unwrap();
        assert!(matches!(refs.remove("dev"), Err(VcsError::BranchNotFound(_))));
    }

    #[test]
    fn test_invalid_names() {
        let mut refs = Refs::new(Oid::hash(b"root"));
        for name in ["", "a/b", "a\\b", ".", ".."] {
            assert!(matches!(
                refs.create(name, Oid::hash(b"root")),
                Err(VcsError::InvalidArguments)
            ));
        }
    }

    #[test]
    fn test_save_and_load() {
        let meta = MockBackend::new();
        let root = Oid::hash(b"root");
        let mut refs = Refs::new(root);
        refs.create("dev", Oid::hash(b"dev")).unwrap();
        refs.set_head("dev").unwrap();
        refs.save(&meta).unwrap();

        assert_eq!(meta.get("HEAD").unwrap(), b"dev");
        assert_eq!(meta.get("branches/master").unwrap(), root.to_hex().as_bytes());

        let loaded = Refs::load(&meta).unwrap();
        assert_eq!(loaded, refs);
    }

    #[test]
    fn test_save_drops_removed_branch() {
        let meta = MockBackend::new();
        let mut refs = Refs::new(Oid::hash(b"root"));
        refs.create("tmp", Oid::hash(b"root")).unwrap();
        refs.save(&meta).unwrap();

        refs.remove("tmp").unwrap();
        refs.save(&meta).unwrap();
        assert!(!meta.exists("branches/tmp").unwrap());
    }

    #[test]
    fn test_head_with_surrounding_whitespace_survives_reload() {
        let meta = MockBackend::new();
        let root = Oid::hash(b"root");
        let mut refs = Refs::new(root);
        for name in [" x", "dev ", "  both  "] {
            refs.create(name, root).unwrap();
            refs.set_head(name).unwrap();
            refs.save(&meta).unwrap();

            let loaded = Refs::load(&meta).unwrap();
            assert_eq!(loaded.head(), name);
            assert_eq!(loaded.head_commit().unwrap(), root);
        }
    }

    #[test]
    fn test_load_rejects_dangling_head() {
        let meta = MockBackend::new();
        meta.put("HEAD", b"ghost").unwrap();
        meta.put("branches/master", Oid::hash(b"x").to_hex().as_bytes())
            .unwrap();
        assert!(matches!(Refs::load(&meta), Err(VcsError::Corrupt(_))));
    }

    #[test]
    fn test_set_head_unknown() {
        let mut refs = Refs::new(Oid::hash(b"root"));
        assert!(matches!(refs.set_head("nope"), Err(VcsError::NoSuchBranch(_))));
    }
}
