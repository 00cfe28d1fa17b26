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

//! Checkout operations for restoring the working directory from a tree
//!
//! Switching branches, resetting and merging all move the working directory
//! from the tree of the current commit to a target tree. The
//! [`CheckoutManager`] first checks that no untracked file would be
//! clobbered, then rewrites the tracked files.

use crate::{ObjectDatabase, Oid, Tree, VcsError, VcsResult, WorkTree};
use tracing::{debug, info};

/// What a checkout changed in the working directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutStats {
    /// Files created or overwritten
    pub written: usize,
    /// Files already holding the target content
    pub unchanged: usize,
    /// Tracked files deleted because the target does not track them
    pub removed: usize,
}

/// Checkout manager for working directory operations
pub struct CheckoutManager<'a> {
    blobs: &'a ObjectDatabase,
    worktree: &'a dyn WorkTree,
}

impl<'a> CheckoutManager<'a> {
    /// Create a new checkout manager
    pub fn new(blobs: &'a ObjectDatabase, worktree: &'a dyn WorkTree) -> Self {
        Self { blobs, worktree }
    }

    /// Untracked files that moving to `target` would overwrite
    ///
    /// A file is in the way when `current` does not track it, `target`
    /// does, and the working copy differs from the target content.
    pub fn untracked_in_the_way(&self, current: &Tree, target: &Tree) -> VcsResult<Vec<String>> {
        let mut blocking = Vec::new();
        for name in self.worktree.list()? {
            if current.contains_key(&name) {
                continue;
            }
            if let Some(target_oid) = target.get(&name) {
                let content = self.worktree.read(&name)?;
                if Oid::hash(&content) != *target_oid {
                    blocking.push(name);
                }
            }
        }
        Ok(blocking)
    }

    /// Reject the move if an untracked file is in the way
    ///
    /// # Errors
    ///
    /// [`VcsError::UntrackedFileConflict`] listing the offending files.
    pub fn guard_untracked(&self, current: &Tree, target: &Tree) -> VcsResult<()> {
        let blocking = self.untracked_in_the_way(current, target)?;
        if blocking.is_empty() {
            Ok(())
        } else {
            debug!(files = ?blocking, "Untracked files in the way");
            Err(VcsError::UntrackedFileConflict(blocking))
        }
    }

    /// Make the working directory match `target`
    ///
    /// Files whose content already matches are left alone. Files tracked by
    /// `current` but not by `target` are deleted. Untracked files are never
    /// touched.
    pub fn checkout_tree(&self, current: &Tree, target: &Tree) -> VcsResult<CheckoutStats> {
        let mut stats = CheckoutStats::default();

        for (name, oid) in target {
            if self.holds(name, oid)? {
                stats.unchanged += 1;
                continue;
            }
            let data = self.blobs.read(oid)?;
            self.worktree.write(name, &data)?;
            stats.written += 1;
        }

        for name in current.keys() {
            if !target.contains_key(name) {
                debug!(file = %name, "Removing file not in target");
                self.worktree.remove(name)?;
                stats.removed += 1;
            }
        }

        info!(
            written = stats.written,
            unchanged = stats.unchanged,
            removed = stats.removed,
            "Checked out tree"
        );
        Ok(stats)
    }

    /// Overwrite one working file with the content of `oid`
    pub fn checkout_file(&self, name: &str, oid: &Oid) -> VcsResult<()> {
        let data = self.blobs.read(oid)?;
        self.worktree.write(name, &data)
    }

    fn holds(&self, name: &str, oid: &Oid) -> VcsResult<bool> {
        match self.worktree.read(name) {
            Ok(content) => Ok(Oid::hash(&content) == *oid),
            Err(VcsError::FileNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
