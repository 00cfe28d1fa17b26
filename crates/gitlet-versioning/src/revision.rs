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

//! Commit id resolution
//!
//! Commands accept a full 64-character id or any unique prefix of at least
//! four hex characters.

use crate::odb::MIN_PREFIX_LEN;
use crate::{ObjectDatabase, Oid, VcsError, VcsResult, OID_HEX_LEN};
use tracing::debug;

/// Resolve a full or abbreviated commit id
///
/// # Errors
///
/// [`VcsError::CommitNotFound`] if `revision` is too short, not hex,
/// unknown, or matches more than one commit.
pub fn resolve_commit(revision: &str, commits: &ObjectDatabase) -> VcsResult<Oid> {
    let not_found = || VcsError::CommitNotFound(revision.to_string());

    if revision.len() < MIN_PREFIX_LEN || !Oid::is_hex_prefix(revision) {
        return Err(not_found());
    }

    if revision.len() == OID_HEX_LEN {
        let oid = Oid::from_hex(&revision.to_ascii_lowercase()).map_err(|_| not_found())?;
        return if commits.exists(&oid)? {
            Ok(oid)
        } else {
            Err(not_found())
        };
    }

    let oid = commits.find_by_prefix(revision)?.ok_or_else(not_found)?;
    debug!(revision = %revision, oid = %oid, "Resolved abbreviated commit id");
    Ok(oid)
}
