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

//! Commit object representing snapshots in version control
//!
//! A commit records a message, a timestamp, its parents and a tree mapping
//! each tracked file name to the digest of its content. The commit's own id
//! is the digest of its encoded form, so the encoding must be deterministic:
//! the tree is a `BTreeMap` and the timestamp is stored as nanoseconds since
//! the epoch, which is also what orders commits made in the same second.

use crate::{ObjectDatabase, Oid, VcsResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Message of the commit every repository starts from
pub const INITIAL_COMMIT_MESSAGE: &str = "initial commit";

/// File name to blob id mapping of a commit
pub type Tree = BTreeMap<String, Oid>;

/// Parent links of a commit
///
/// Only the initial commit is `Root`. Merge commits list the branch that was
/// checked out first and the merged-in branch second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parents {
    /// No parent
    Root,
    /// Ordinary commit
    Single(Oid),
    /// Merge commit: (current, given)
    Merge(Oid, Oid),
}

impl Parents {
    /// Parent ids in order
    pub fn to_vec(&self) -> Vec<Oid> {
        match *self {
            Parents::Root => Vec::new(),
            Parents::Single(p) => vec![p],
            Parents::Merge(first, second) => vec![first, second],
        }
    }

    /// First parent, if any
    pub fn first(&self) -> Option<Oid> {
        match *self {
            Parents::Root => None,
            Parents::Single(p) | Parents::Merge(p, _) => Some(p),
        }
    }

    /// Number of parents
    pub fn len(&self) -> usize {
        match self {
            Parents::Root => 0,
            Parents::Single(_) => 1,
            Parents::Merge(..) => 2,
        }
    }

    /// Check if there are no parents
    pub fn is_empty(&self) -> bool {
        matches!(self, Parents::Root)
    }
}

/// Snapshot of the tracked files at one point in history
///
/// # Examples
///
/// ```
/// use gitlet_versioning::{Commit, ObjectDatabase, ObjectType};
/// use gitlet_storage::MockBackend;
/// use std::sync::Arc;
///
/// # fn main() -> gitlet_versioning::VcsResult<()> {
/// let odb = ObjectDatabase::new(Arc::new(MockBackend::new()), ObjectType::Commit);
///
/// let root = Commit::initial();
/// let root_oid = root.write(&odb)?;
///
/// let loaded = Commit::read(&odb, &root_oid)?;
/// assert_eq!(loaded, root);
/// assert!(loaded.is_initial());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit message
    pub message: String,

    /// Creation time, nanosecond precision
    #[serde(with = "chrono::serde::ts_nanoseconds")]
    pub timestamp: DateTime<Utc>,

    /// Parent commits
    pub parents: Parents,

    /// Tracked files
    pub tree: Tree,
}

impl Commit {
    /// The commit every repository starts from
    ///
    /// Message `"initial commit"`, Unix epoch timestamp, empty tree and no
    /// parents; its id is the same in every repository.
    pub fn initial() -> Self {
        Self {
            message: INITIAL_COMMIT_MESSAGE.to_string(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            parents: Parents::Root,
            tree: Tree::new(),
        }
    }

    /// Create an ordinary commit stamped with the current time
    pub fn new(message: impl Into<String>, parent: Oid, tree: Tree) -> Self {
        Self::with_timestamp(message, Parents::Single(parent), tree, Utc::now())
    }

    /// Create a merge commit stamped with the current time
    pub fn merge(message: impl Into<String>, current: Oid, given: Oid, tree: Tree) -> Self {
        Self::with_timestamp(message, Parents::Merge(current, given), tree, Utc::now())
    }

    /// Create a commit with an explicit timestamp
    ///
    /// Encoding fails for times outside the nanosecond range (1677 to 2262).
    pub fn with_timestamp(
        message: impl Into<String>,
        parents: Parents,
        tree: Tree,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            message: message.into(),
            timestamp,
            parents,
            tree,
        }
    }

    /// Check if this is the initial commit (no parents)
    pub fn is_initial(&self) -> bool {
        self.parents.is_empty()
    }

    /// Check if this is a merge commit (two parents)
    pub fn is_merge(&self) -> bool {
        matches!(self.parents, Parents::Merge(..))
    }

    /// Get the first parent
    pub fn first_parent(&self) -> Option<Oid> {
        self.parents.first()
    }

    /// Blob id tracked for `path`
    pub fn blob(&self, path: &str) -> Option<&Oid> {
        self.tree.get(path)
    }

    /// Check whether `path` is tracked
    pub fn tracks(&self, path: &str) -> bool {
        self.tree.contains_key(path)
    }

    /// Serialize commit to bytes
    pub fn serialize(&self) -> VcsResult<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Deserialize commit from bytes
    pub fn deserialize(data: &[u8]) -> VcsResult<Self> {
        Ok(postcard::from_bytes(data)?)
    }

    /// Id the commit has (or will have) once written
    pub fn oid(&self) -> VcsResult<Oid> {
        Ok(Oid::hash(&self.serialize()?))
    }

    /// Write commit to the object database and return its id
    pub fn write(&self, odb: &ObjectDatabase) -> VcsResult<Oid> {
        let data = self.serialize()?;
        odb.write(&data)
    }

    /// Read commit from the object database
    pub fn read(odb: &ObjectDatabase, oid: &Oid) -> VcsResult<Self> {
        let data = odb.read(oid)?;
        Self::deserialize(&data)
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
