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

//! Three-way tree merge
//!
//! Every file name present in the split-point tree (S), the current tree (C)
//! or the given tree (G) is resolved independently:
//!
//! | condition                          | result        |
//! |------------------------------------|---------------|
//! | C == G                             | keep current  |
//! | C == S, G changed                  | take given    |
//! | C == S, G deleted                  | delete        |
//! | G == S, C changed                  | keep current  |
//! | only G has it                      | take given    |
//! | C, G and S all differ              | conflict      |
//!
//! "Absent" counts as a value, so "C == G" includes both sides deleting.

use crate::conflict::render_conflict;
use crate::{Conflict, ConflictType, ObjectDatabase, Oid, Tree, VcsResult};
use std::collections::BTreeSet;
use tracing::{debug, instrument, trace};

/// How one file is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep the current side (possibly absent)
    KeepCurrent,
    /// Take the given side's content
    TakeGiven(Oid),
    /// Delete a file the current side still tracks
    Delete,
    /// Both sides changed the file differently
    Conflict(ConflictType),
}

/// Resolve one file from its split, current and given versions
///
/// ```
/// use gitlet_versioning::{merge::{classify, Resolution}, Oid};
///
/// let s = Oid::hash(b"base");
/// let g = Oid::hash(b"theirs");
/// assert_eq!(classify(Some(&s), Some(&s), Some(&g)), Resolution::TakeGiven(g));
/// assert_eq!(classify(Some(&s), Some(&s), None), Resolution::Delete);
/// ```
pub fn classify(split: Option<&Oid>, current: Option<&Oid>, given: Option<&Oid>) -> Resolution {
    if current == given || given == split {
        return Resolution::KeepCurrent;
    }
    if current == split {
        return match given {
            Some(oid) => Resolution::TakeGiven(*oid),
            None => Resolution::Delete,
        };
    }
    Resolution::Conflict(ConflictType::from_presence(
        split.is_some(),
        current.is_some(),
        given.is_some(),
    ))
}

/// Merged tree plus the conflicts it contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeMerge {
    /// Tree of the merge commit
    pub tree: Tree,
    /// Conflicted files, sorted by name
    pub conflicts: Vec<Conflict>,
}

impl TreeMerge {
    /// Check if any file conflicted
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Three-way merge over commit trees
///
/// Conflict blobs are written to the blob store so that the merged tree can
/// be checked out and committed like any other.
pub struct MergeEngine<'a> {
    blobs: &'a ObjectDatabase,
}

impl<'a> MergeEngine<'a> {
    /// Create a merge engine writing conflict blobs to `blobs`
    pub fn new(blobs: &'a ObjectDatabase) -> Self {
        Self { blobs }
    }

    /// Merge `given` into `current` relative to `split`
    #[instrument(level = "debug", skip_all, fields(split = split.len(), current = current.len(), given = given.len()))]
    pub fn merge_trees(&self, split: &Tree, current: &Tree, given: &Tree) -> VcsResult<TreeMerge> {
        let paths: BTreeSet<&String> = split
            .keys()
            .chain(current.keys())
            .chain(given.keys())
            .collect();

        let mut tree = current.clone();
        let mut conflicts = Vec::new();

        for path in paths {
            let s = split.get(path);
            let c = current.get(path);
            let g = given.get(path);

            match classify(s, c, g) {
                Resolution::KeepCurrent => {
                    trace!(file = %path, "Keeping current version");
                }
                Resolution::TakeGiven(oid) => {
                    debug!(file = %path, "Taking given version");
                    tree.insert(path.clone(), oid);
                }
                Resolution::Delete => {
                    debug!(file = %path, "Deleting file removed by given branch");
                    tree.remove(path);
                }
                Resolution::Conflict(conflict_type) => {
                    let ours = c.map(|oid| self.blobs.read(oid)).transpose()?;
                    let theirs = g.map(|oid| self.blobs.read(oid)).transpose()?;
                    let blob = render_conflict(ours.as_deref(), theirs.as_deref());
                    let result = self.blobs.write(&blob)?;

                    debug!(file = %path, kind = %conflict_type, "Merge conflict");
                    tree.insert(path.clone(), result);
                    conflicts.push(Conflict {
                        path: path.clone(),
                        conflict_type,
                        base: s.copied(),
                        ours: c.copied(),
                        theirs: g.copied(),
                        result,
                    });
                }
            }
        }

        debug!(files = tree.len(), conflicts = conflicts.len(), "Merged trees");
        Ok(TreeMerge { tree, conflicts })
    }
}
