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

//! Version control engine for Gitlet
//!
//! This crate implements the core of a single-user, local version control
//! system:
//! - Content-addressable object database with SHA-256 addressing
//! - Commits with deterministic encoding and a commit history graph
//! - A staging area between the working directory and the next commit
//! - Branch checkout, reset and three-way merge with conflict blobs
//!
//! # Architecture
//!
//! - **Object stores**: commits, blobs and staged copies each live in an
//!   [`ObjectDatabase`] over a `StorageBackend`
//! - **Metadata**: HEAD, branches, staging records and the graph live in a
//!   flat metadata store
//! - **Working directory**: accessed through the [`WorkTree`] trait, so the
//!   whole engine runs in memory in tests
//! - **[`Repository`]**: loads the state once, applies one operation, and
//!   persists the state on success
//!
//! # Examples
//!
//! ```
//! use gitlet_versioning::{Backends, MemWorkTree, MergeOutcome, Repository, WorkTree};
//!
//! # fn main() -> gitlet_versioning::VcsResult<()> {
//! let work = MemWorkTree::new();
//! let mut repo = Repository::init_with(Backends::in_memory(), Box::new(work.clone()))?;
//!
//! repo.branch("feature")?;
//! repo.checkout_branch("feature")?;
//! work.write("feature.txt", b"new work\n")?;
//! repo.add("feature.txt")?;
//! repo.commit("add feature")?;
//!
//! repo.checkout_branch("master")?;
//! assert!(!work.exists("feature.txt")?);
//!
//! let report = repo.merge("feature")?;
//! assert_eq!(report.outcome, MergeOutcome::FastForward);
//! assert!(work.exists("feature.txt")?);
//! # Ok(())
//! # }
//! ```

pub mod checkout;
pub mod commit;
pub mod conflict;
pub mod error;
pub mod graph;
pub mod merge;
pub mod object;
pub mod odb;
pub mod oid;
pub mod refs;
pub mod repository;
pub mod revision;
pub mod staging;
pub mod worktree;

pub use checkout::{CheckoutManager, CheckoutStats};
pub use commit::{Commit, Parents, Tree, INITIAL_COMMIT_MESSAGE};
pub use conflict::{Conflict, ConflictType};
pub use error::{VcsError, VcsResult};
pub use graph::CommitGraph;
pub use merge::{MergeEngine, Resolution, TreeMerge};
pub use object::ObjectType;
pub use odb::ObjectDatabase;
pub use oid::{Oid, OID_HEX_LEN};
pub use refs::{Refs, DEFAULT_BRANCH};
pub use repository::{
    Backends, FileChange, LogEntry, MergeOutcome, MergeReport, RepoState, Repository,
    StatusReport,
};
pub use revision::resolve_commit;
pub use staging::StagingArea;
pub use worktree::{FsWorkTree, MemWorkTree, WorkTree, GITLET_DIR};
