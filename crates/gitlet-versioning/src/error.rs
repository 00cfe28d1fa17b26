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

//! Repository error taxonomy
//!
//! Each user-facing variant renders as the exact line printed by the CLI.
//! The remaining variants wrap infrastructure failures.

use gitlet_storage::StorageError;
use std::io;
use thiserror::Error;

/// Result type alias for repository operations
pub type VcsResult<T> = Result<T, VcsError>;

/// Errors raised by repository operations
#[derive(Error, Debug)]
pub enum VcsError {
    /// `init` inside an existing repository
    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    /// Any command but `init` outside a repository
    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    /// Working-directory file is missing
    #[error("File does not exist.")]
    FileNotFound(String),

    /// Staging area is empty at commit time
    #[error("No changes added to the commit.")]
    NothingToCommit,

    /// Commit message is missing or blank
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,

    /// `rm` of a path that is neither staged nor tracked
    #[error("No reason to remove the file.")]
    NothingToRemove(String),

    /// Commit id is unknown, too short or ambiguous
    #[error("No commit with that id exists.")]
    CommitNotFound(String),

    /// No commit carries the requested message
    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    /// Path is not tracked by the requested commit
    #[error("File does not exist in that commit.")]
    FileNotInCommit(String),

    /// `checkout` of an unknown branch
    #[error("No such branch exists.")]
    NoSuchBranch(String),

    /// `checkout` of the active branch
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    /// `rm-branch` / `merge` of an unknown branch
    #[error("A branch with that name does not exist.")]
    BranchNotFound(String),

    /// `branch` with a name already in use
    #[error("A branch with that name already exists.")]
    BranchAlreadyExists(String),

    /// `rm-branch` of the active branch
    #[error("Cannot remove the current branch.")]
    CannotRemoveActiveBranch,

    /// An untracked working file would be overwritten
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict(Vec<String>),

    /// Merging a branch whose tip equals the current tip
    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    /// Merging with a non-empty staging area
    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    /// Wrong operand count or shape
    #[error("Incorrect operands.")]
    InvalidArguments,

    /// Persisted data could not be decoded
    #[error("repository data is corrupt: {0}")]
    Corrupt(String),

    /// Storage backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Working-directory I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl VcsError {
    /// Create a Corrupt error with context
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        VcsError::Corrupt(msg.into())
    }

    /// Whether the error belongs to the user-facing taxonomy
    ///
    /// User errors end a command normally; the others indicate a damaged
    /// repository or environment.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            VcsError::Corrupt(_) | VcsError::Storage(_) | VcsError::Io(_)
        )
    }
}

impl From<serde_json::Error> for VcsError {
    fn from(err: serde_json::Error) -> Self {
        VcsError::Corrupt(err.to_string())
    }
}

impl From<postcard::Error> for VcsError {
    fn from(err: postcard::Error) -> Self {
        VcsError::Corrupt(err.to_string())
    }
}
