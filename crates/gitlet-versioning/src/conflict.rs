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

//! Merge conflicts and conflict blobs
//!
//! When both sides of a merge changed a file differently, the merged tree
//! holds a conflict blob:
//!
//! ```text
//! <<<<<<< HEAD
//! (current content)=======
//! (given content)>>>>>>>
//! ```
//!
//! A side that deleted the file contributes nothing. No newline is added
//! after either side or after the closing marker.

use crate::Oid;
use std::fmt;

const OURS_MARKER: &[u8] = b"<<<<<<< HEAD\n";
const SEPARATOR: &[u8] = b"=======\n";
const THEIRS_MARKER: &[u8] = b">>>>>>>";

/// Type of merge conflict detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictType {
    /// Both sides modified the file differently
    ModifyModify,

    /// Both sides added the path with different content
    AddAdd,

    /// Current side modified, given side deleted
    ModifyDelete,

    /// Current side deleted, given side modified
    DeleteModify,
}

impl ConflictType {
    /// Classify a conflict from which sides hold the file
    pub fn from_presence(in_split: bool, in_current: bool, in_given: bool) -> Self {
        match (in_split, in_current, in_given) {
            (false, _, _) => ConflictType::AddAdd,
            (true, true, false) => ConflictType::ModifyDelete,
            (true, false, true) => ConflictType::DeleteModify,
            _ => ConflictType::ModifyModify,
        }
    }
}

impl fmt::Display for ConflictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictType::ModifyModify => "modify/modify",
            ConflictType::AddAdd => "add/add",
            ConflictType::ModifyDelete => "modify/delete",
            ConflictType::DeleteModify => "delete/modify",
        };
        f.write_str(s)
    }
}

/// A file that both sides of a merge changed differently
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// File name
    pub path: String,

    /// Type of conflict
    pub conflict_type: ConflictType,

    /// Content at the split point (None if absent there)
    pub base: Option<Oid>,

    /// Current branch content (None if deleted)
    pub ours: Option<Oid>,

    /// Given branch content (None if deleted)
    pub theirs: Option<Oid>,

    /// Conflict blob written to the merged tree
    pub result: Oid,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.conflict_type)
    }
}

/// Build the conflict blob for two sides of a file
///
/// ```
/// use gitlet_versioning::conflict::render_conflict;
///
/// let blob = render_conflict(Some(&b"mine\n"[..]), Some(&b"theirs\n"[..]));
/// assert_eq!(blob, b"<<<<<<< HEAD\nmine\n=======\ntheirs\n>>>>>>>");
///
/// let blob = render_conflict(Some(&b"mine\n"[..]), None);
/// assert_eq!(blob, b"<<<<<<< HEAD\nmine\n=======\n>>>>>>>");
/// ```
pub fn render_conflict(ours: Option<&[u8]>, theirs: Option<&[u8]>) -> Vec<u8> {
    let ours = ours.unwrap_or_default();
    let theirs = theirs.unwrap_or_default();

    let mut out = Vec::with_capacity(
        OURS_MARKER.len() + ours.len() + SEPARATOR.len() + theirs.len() + THEIRS_MARKER.len(),
    );
    out.extend_from_slice(OURS_MARKER);
    out.extend_from_slice(ours);
    out.extend_from_slice(SEPARATOR);
    out.extend_from_slice(theirs);
    out.extend_from_slice(THEIRS_MARKER);
    out
}
