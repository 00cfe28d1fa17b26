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

//! Repository state machine
//!
//! A [`Repository`] loads HEAD, the branch table, the staging area and the
//! commit graph once, applies one operation, and writes the state back only
//! if the operation succeeds. Every precondition is checked before anything
//! is mutated.
//!
//! # Examples
//!
//! ```
//! use gitlet_versioning::{Backends, MemWorkTree, Repository, WorkTree};
//!
//! # fn main() -> gitlet_versioning::VcsResult<()> {
//! let work = MemWorkTree::new();
//! let mut repo = Repository::init_with(Backends::in_memory(), Box::new(work.clone()))?;
//!
//! work.write("notes.txt", b"hello\n")?;
//! repo.add("notes.txt")?;
//! repo.commit("add notes")?;
//!
//! let log = repo.log()?;
//! assert_eq!(log.len(), 2);
//! assert_eq!(log[0].commit.message, "add notes");
//! # Ok(())
//! # }
//! ```

use crate::checkout::CheckoutManager;
use crate::graph::CommitGraph;
use crate::merge::{MergeEngine, TreeMerge};
use crate::refs::{Refs, HEAD_KEY};
use crate::revision::resolve_commit;
use crate::staging::StagingArea;
use crate::worktree::{FsWorkTree, WorkTree, GITLET_DIR};
use crate::{Commit, Conflict, ObjectDatabase, ObjectType, Oid, Parents, VcsError, VcsResult};
use chrono::{DateTime, Duration, Utc};
use gitlet_storage::{LocalBackend, MockBackend, StorageBackend};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Metadata key of the persisted commit graph
pub const GRAPH_KEY: &str = "graph";

/// Directory of the commit store inside `.gitlet`
pub const COMMITS_DIR: &str = "commits";

/// Directory of the blob store inside `.gitlet`
pub const BLOBS_DIR: &str = "blobs";

/// Directory of the staged-copy store inside `.gitlet`
pub const STAGED_BLOBS_DIR: &str = "staging/blobs";

/// The four stores a repository is built on
#[derive(Debug, Clone)]
pub struct Backends {
    /// HEAD, branches, staging records and the graph (flat keys)
    pub meta: Arc<dyn StorageBackend>,
    /// Commit objects
    pub commits: Arc<dyn StorageBackend>,
    /// File contents referenced by commits
    pub blobs: Arc<dyn StorageBackend>,
    /// Copies of staged file contents
    pub staged: Arc<dyn StorageBackend>,
}

impl Backends {
    /// Filesystem stores under a `.gitlet` directory
    pub fn local(gitlet_dir: &Path) -> VcsResult<Self> {
        Ok(Self {
            meta: Arc::new(LocalBackend::flat(gitlet_dir)?),
            commits: Arc::new(LocalBackend::sharded(gitlet_dir.join(COMMITS_DIR))?),
            blobs: Arc::new(LocalBackend::sharded(gitlet_dir.join(BLOBS_DIR))?),
            staged: Arc::new(LocalBackend::sharded(gitlet_dir.join(STAGED_BLOBS_DIR))?),
        })
    }

    /// Fresh in-memory stores
    pub fn in_memory() -> Self {
        Self {
            meta: Arc::new(MockBackend::new()),
            commits: Arc::new(MockBackend::new()),
            blobs: Arc::new(MockBackend::new()),
            staged: Arc::new(MockBackend::new()),
        }
    }
}

/// Mutable repository state, loaded once per command
#[derive(Debug, Clone)]
pub struct RepoState {
    /// HEAD and branch table
    pub refs: Refs,
    /// Staged additions and removals
    pub staging: StagingArea,
    /// Commit history graph
    pub graph: CommitGraph,
}

/// One commit in a history listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Commit id
    pub oid: Oid,
    /// Commit contents
    pub commit: Commit,
}

/// How an unstaged working file differs from the current state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChange {
    /// Content differs
    Modified,
    /// File is missing
    Deleted,
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileChange::Modified => f.write_str("modified"),
            FileChange::Deleted => f.write_str("deleted"),
        }
    }
}

/// Snapshot of branches, staging and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Active branch
    pub current_branch: String,
    /// All branch names, sorted
    pub branches: Vec<String>,
    /// Files staged for addition
    pub staged: Vec<String>,
    /// Files staged for removal
    pub removed: Vec<String>,
    /// Changes not staged for commit
    pub modified: Vec<(String, FileChange)>,
    /// Working files the next commit would not track
    pub untracked: Vec<String>,
}

/// What a merge did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch is already contained in the current one
    AlreadyAncestor,
    /// The current tip was an ancestor; the given branch was checked out
    FastForward,
    /// A merge commit was created
    Merged {
        /// Id of the merge commit
        commit: Oid,
        /// Files holding conflict blobs
        conflicts: Vec<Conflict>,
    },
}

/// Result of [`Repository::merge`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Branch that was merged in
    pub given: String,
    /// Branch that was active
    pub current: String,
    /// What happened
    pub outcome: MergeOutcome,
}

impl MergeReport {
    /// Check if the merge left conflict blobs
    pub fn has_conflicts(&self) -> bool {
        matches!(&self.outcome, MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty())
    }
}

/// A gitlet repository
pub struct Repository {
    meta: Arc<dyn StorageBackend>,
    commits: ObjectDatabase,
    blobs: ObjectDatabase,
    staged: ObjectDatabase,
    worktree: Box<dyn WorkTree>,
    state: RepoState,
}

impl Repository {
    /// Create a repository in `root/.gitlet`
    ///
    /// # Errors
    ///
    /// [`VcsError::AlreadyInitialized`] if `.gitlet` already exists.
    pub fn init(root: &Path) -> VcsResult<Self> {
        let gitlet_dir = root.join(GITLET_DIR);
        if gitlet_dir.exists() {
            return Err(VcsError::AlreadyInitialized);
        }
        let backends = Backends::local(&gitlet_dir)?;
        Self::init_with(backends, Box::new(FsWorkTree::new(root)))
    }

    /// Open the repository in `root/.gitlet`
    ///
    /// # Errors
    ///
    /// [`VcsError::NotInitialized`] if there is no repository.
    pub fn open(root: &Path) -> VcsResult<Self> {
        let gitlet_dir = root.join(GITLET_DIR);
        if !gitlet_dir.is_dir() {
            return Err(VcsError::NotInitialized);
        }
        let backends = Backends::local(&gitlet_dir)?;
        Self::open_with(backends, Box::new(FsWorkTree::new(root)))
    }

    /// Create a repository over the given stores
    ///
    /// Writes the initial commit and a `master` branch pointing at it.
    pub fn init_with(backends: Backends, worktree: Box<dyn WorkTree>) -> VcsResult<Self> {
        if backends.meta.exists(HEAD_KEY)? {
            return Err(VcsError::AlreadyInitialized);
        }

        let commits = ObjectDatabase::new(backends.commits, ObjectType::Commit);
        let root = Commit::initial().write(&commits)?;

        let repo = Self {
            meta: backends.meta,
            commits,
            blobs: ObjectDatabase::new(backends.blobs, ObjectType::Blob),
            staged: ObjectDatabase::new(backends.staged, ObjectType::Blob),
            worktree,
            state: RepoState {
                refs: Refs::new(root),
                staging: StagingArea::new(),
                graph: CommitGraph::new(root),
            },
        };
        repo.persist()?;

        info!(root = %root, "Initialized repository");
        Ok(repo)
    }

    /// Open an existing repository over the given stores
    ///
    /// A missing graph record is rebuilt from the stored commits.
    pub fn open_with(backends: Backends, worktree: Box<dyn WorkTree>) -> VcsResult<Self> {
        if !backends.meta.exists(HEAD_KEY)? {
            return Err(VcsError::NotInitialized);
        }

        let meta = backends.meta;
        let commits = ObjectDatabase::new(backends.commits, ObjectType::Commit);
        let refs = Refs::load(meta.as_ref())?;
        let staging = StagingArea::load(meta.as_ref())?;

        let graph = match meta.get(GRAPH_KEY) {
            Ok(data) => CommitGraph::from_json(&data)?,
            Err(e) if e.is_not_found() => {
                info!("Commit graph missing, rebuilding from stored commits");
                let all = commits
                    .list()?
                    .into_iter()
                    .map(|oid| Commit::read(&commits, &oid).map(|c| (oid, c)))
                    .collect::<VcsResult<Vec<_>>>()?;
                let graph = CommitGraph::rebuild(all)?;
                meta.put(GRAPH_KEY, &graph.to_json()?)?;
                graph
            }
            Err(e) => return Err(e.into()),
        };

        debug!(head = %refs.head(), staged = staging.len(), commits = graph.len(), "Opened repository");
        Ok(Self {
            meta,
            commits,
            blobs: ObjectDatabase::new(backends.blobs, ObjectType::Blob),
            staged: ObjectDatabase::new(backends.staged, ObjectType::Blob),
            worktree,
            state: RepoState {
                refs,
                staging,
                graph,
            },
        })
    }

    /// Current repository state
    pub fn state(&self) -> &RepoState {
        &self.state
    }

    /// Commit store
    pub fn commits(&self) -> &ObjectDatabase {
        &self.commits
    }

    /// Blob store
    pub fn blobs(&self) -> &ObjectDatabase {
        &self.blobs
    }

    /// Name of the active branch
    pub fn current_branch(&self) -> &str {
        self.state.refs.head()
    }

    /// Id of the commit HEAD resolves to
    pub fn head_oid(&self) -> VcsResult<Oid> {
        self.state.refs.head_commit()
    }

    /// Commit HEAD resolves to
    pub fn head_commit(&self) -> VcsResult<Commit> {
        self.read_commit(&self.head_oid()?)
    }

    /// Read a commit by full id
    pub fn read_commit(&self, oid: &Oid) -> VcsResult<Commit> {
        Commit::read(&self.commits, oid).map_err(|e| match e {
            VcsError::Storage(ref s) if s.is_not_found() => VcsError::CommitNotFound(oid.to_hex()),
            other => other,
        })
    }

    /// Stage a working file for the next commit
    ///
    /// Staging content identical to HEAD's version drops any pending change
    /// to the file instead.
    pub fn add(&mut self, name: &str) -> VcsResult<()> {
        let content = self.worktree.read(name)?;
        let oid = Oid::hash(&content);
        let head = self.head_commit()?;

        if head.blob(name) == Some(&oid) {
            debug!(file = %name, "Content matches HEAD, clearing staged changes");
            if let Some(previous) = self.state.staging.unstage_addition(name) {
                self.drop_staged_copy(&previous)?;
            }
            self.state.staging.unstage_removal(name);
        } else {
            self.staged.write(&content)?;
            if let Some(previous) = self.state.staging.unstage_addition(name) {
                if previous != oid {
                    self.drop_staged_copy(&previous)?;
                }
            }
            self.state.staging.stage_addition(name, oid);
            debug!(file = %name, oid = %oid, "Staged file");
        }

        self.persist()
    }

    /// Record the staged changes as a new commit on the active branch
    pub fn commit(&mut self, message: &str) -> VcsResult<Oid> {
        if message.is_empty() {
            return Err(VcsError::EmptyCommitMessage);
        }
        if self.state.staging.is_empty() {
            return Err(VcsError::NothingToCommit);
        }

        let parent = self.head_oid()?;
        let mut tree = self.head_commit()?.tree;

        for (name, oid) in self.state.staging.additions() {
            let data = self.staged.read(oid)?;
            self.blobs.write(&data)?;
            tree.insert(name.clone(), *oid);
        }
        for name in self.state.staging.removals() {
            tree.remove(name);
        }

        let commit =
            Commit::with_timestamp(message, Parents::Single(parent), tree, self.next_timestamp()?);
        let oid = commit.write(&self.commits)?;

        self.state.graph.add_edge(parent, oid);
        self.state.refs.advance_head(oid);
        self.clear_staging()?;
        self.persist()?;

        info!(oid = %oid, branch = %self.current_branch(), files = commit.tree.len(), "Created commit");
        Ok(oid)
    }

    /// Unstage a file, or stage its removal if HEAD tracks it
    ///
    /// Staging a removal also deletes the working file.
    pub fn rm(&mut self, name: &str) -> VcsResult<()> {
        if let Some(previous) = self.state.staging.unstage_addition(name) {
            self.drop_staged_copy(&previous)?;
            debug!(file = %name, "Unstaged file");
        } else if self.head_commit()?.tracks(name) {
            self.state.staging.stage_removal(name);
            self.worktree.remove(name)?;
            debug!(file = %name, "Staged removal");
        } else {
            return Err(VcsError::NothingToRemove(name.to_string()));
        }

        self.persist()
    }

    /// First-parent history from HEAD back to the initial commit
    pub fn log(&self) -> VcsResult<Vec<LogEntry>> {
        let mut entries = Vec::new();
        let mut next = Some(self.head_oid()?);

        while let Some(oid) = next {
            let commit = self.read_commit(&oid)?;
            next = commit.first_parent();
            entries.push(LogEntry { oid, commit });
        }

        Ok(entries)
    }

    /// Every stored commit, in id order
    pub fn global_log(&self) -> VcsResult<Vec<LogEntry>> {
        self.commits
            .list()?
            .into_iter()
            .map(|oid| Ok(LogEntry { oid, commit: self.read_commit(&oid)? }))
            .collect()
    }

    /// Ids of every commit whose message is exactly `message`
    pub fn find(&self, message: &str) -> VcsResult<Vec<Oid>> {
        let found: Vec<Oid> = self
            .global_log()?
            .into_iter()
            .filter(|entry| entry.commit.message == message)
            .map(|entry| entry.oid)
            .collect();

        if found.is_empty() {
            return Err(VcsError::NoCommitWithMessage);
        }
        Ok(found)
    }

    /// Branches, staged changes, unstaged changes and untracked files
    pub fn status(&self) -> VcsResult<StatusReport> {
        let staging = &self.state.staging;

        // What the next commit would track
        let mut current = self.head_commit()?.tree;
        for (name, oid) in staging.additions() {
            current.insert(name.clone(), *oid);
        }
        for name in staging.removals() {
            current.remove(name);
        }

        let working: BTreeSet<String> = self.worktree.list()?.into_iter().collect();

        let mut modified = Vec::new();
        for (name, oid) in &current {
            if working.contains(name) {
                if Oid::hash(&self.worktree.read(name)?) != *oid {
                    modified.push((name.clone(), FileChange::Modified));
                }
            } else {
                modified.push((name.clone(), FileChange::Deleted));
            }
        }

        let untracked = working
            .into_iter()
            .filter(|name| !current.contains_key(name))
            .collect();

        Ok(StatusReport {
            current_branch: self.current_branch().to_string(),
            branches: self.state.refs.branches().keys().cloned().collect(),
            staged: staging.additions().keys().cloned().collect(),
            removed: staging.removals().iter().cloned().collect(),
            modified,
            untracked,
        })
    }

    /// Restore one file from a commit (HEAD by default)
    ///
    /// The working file is overwritten unconditionally; staging is not
    /// touched.
    pub fn checkout_file(&self, commit: Option<&str>, name: &str) -> VcsResult<()> {
        let oid = match commit {
            Some(revision) => resolve_commit(revision, &self.commits)?,
            None => self.head_oid()?,
        };
        let commit = self.read_commit(&oid)?;
        let blob = commit
            .blob(name)
            .ok_or_else(|| VcsError::FileNotInCommit(name.to_string()))?;

        self.checkout_manager().checkout_file(name, blob)?;
        debug!(file = %name, commit = %oid, "Checked out file");
        Ok(())
    }

    /// Switch to another branch
    pub fn checkout_branch(&mut self, name: &str) -> VcsResult<()> {
        let target_oid = self
            .state
            .refs
            .get(name)
            .ok_or_else(|| VcsError::NoSuchBranch(name.to_string()))?;
        if name == self.current_branch() {
            return Err(VcsError::AlreadyOnBranch);
        }

        self.move_to(&target_oid)?;
        self.state.refs.set_head(name)?;
        self.persist()?;

        info!(branch = %name, commit = %target_oid, "Switched branch");
        Ok(())
    }

    /// Create a branch at HEAD
    pub fn branch(&mut self, name: &str) -> VcsResult<()> {
        let head = self.head_oid()?;
        self.state.refs.create(name, head)?;
        self.persist()?;
        info!(branch = %name, commit = %head, "Created branch");
        Ok(())
    }

    /// Delete a branch pointer; its commits stay
    pub fn rm_branch(&mut self, name: &str) -> VcsResult<()> {
        self.state.refs.remove(name)?;
        self.persist()?;
        info!(branch = %name, "Removed branch");
        Ok(())
    }

    /// Move the active branch to `revision` and check out its tree
    pub fn reset(&mut self, revision: &str) -> VcsResult<Oid> {
        let target_oid = resolve_commit(revision, &self.commits)?;

        self.move_to(&target_oid)?;
        self.state.refs.advance_head(target_oid);
        self.persist()?;

        info!(branch = %self.current_branch(), commit = %target_oid, "Reset branch");
        Ok(target_oid)
    }

    /// Merge the branch `given` into the active branch
    #[instrument(level = "debug", skip(self))]
    pub fn merge(&mut self, given: &str) -> VcsResult<MergeReport> {
        if !self.state.staging.is_empty() {
            return Err(VcsError::UncommittedChanges);
        }
        let given_oid = self
            .state
            .refs
            .get(given)
            .ok_or_else(|| VcsError::BranchNotFound(given.to_string()))?;
        let current_oid = self.head_oid()?;
        if given_oid == current_oid {
            return Err(VcsError::SelfMerge);
        }

        let current_commit = self.read_commit(&current_oid)?;
        let given_commit = self.read_commit(&given_oid)?;
        // Whole given tip, including files the merge may leave alone
        self.checkout_manager()
            .guard_untracked(&current_commit.tree, &given_commit.tree)?;

        let current = self.current_branch().to_string();
        let report = |outcome| MergeReport {
            given: given.to_string(),
            current: current.clone(),
            outcome,
        };

        let split = self.state.graph.split_point(&given_oid, &current_oid)?;
        if split == given_oid {
            debug!(split = %split, "Given branch is an ancestor");
            return Ok(report(MergeOutcome::AlreadyAncestor));
        }
        if split == current_oid {
            debug!(split = %split, "Fast-forwarding");
            self.checkout_branch(given)?;
            return Ok(report(MergeOutcome::FastForward));
        }

        let split_commit = self.read_commit(&split)?;
        let TreeMerge { tree, conflicts } = MergeEngine::new(&self.blobs).merge_trees(
            &split_commit.tree,
            &current_commit.tree,
            &given_commit.tree,
        )?;

        let manager = self.checkout_manager();
        manager.guard_untracked(&current_commit.tree, &tree)?;
        manager.checkout_tree(&current_commit.tree, &tree)?;

        let message = format!("Merged {} into {}.", given, current);
        let merge_commit = Commit::with_timestamp(
            message,
            Parents::Merge(current_oid, given_oid),
            tree,
            self.next_timestamp()?,
        );
        let oid = merge_commit.write(&self.commits)?;

        self.state.graph.add_edge(given_oid, oid);
        self.state.graph.add_edge(current_oid, oid);
        self.state.refs.advance_head(oid);
        self.clear_staging()?;
        self.persist()?;

        info!(commit = %oid, conflicts = conflicts.len(), "Created merge commit");
        Ok(report(MergeOutcome::Merged {
            commit: oid,
            conflicts,
        }))
    }

    /// Current time, or just after the newest commit if the clock lags
    ///
    /// Keeps commit timestamps strictly increasing in creation order, which
    /// is the order [`CommitGraph::rebuild`] replays.
    fn next_timestamp(&self) -> VcsResult<DateTime<Utc>> {
        let now = Utc::now();
        match self.state.graph.latest() {
            Some(latest) => {
                let after = self.read_commit(&latest)?.timestamp + Duration::nanoseconds(1);
                Ok(now.max(after))
            }
            None => Ok(now),
        }
    }

    /// Guard, rewrite the working directory and clear staging
    fn move_to(&mut self, target_oid: &Oid) -> VcsResult<()> {
        let current = self.head_commit()?;
        let target = self.read_commit(target_oid)?;

        let manager = self.checkout_manager();
        manager.guard_untracked(&current.tree, &target.tree)?;
        manager.checkout_tree(&current.tree, &target.tree)?;

        self.clear_staging()
    }

    fn checkout_manager(&self) -> CheckoutManager<'_> {
        CheckoutManager::new(&self.blobs, self.worktree.as_ref())
    }

    fn clear_staging(&mut self) -> VcsResult<()> {
        for oid in self.state.staging.additions().values() {
            self.staged.delete(oid)?;
        }
        self.state.staging.clear();
        Ok(())
    }

    /// Delete a staged copy no other staged file still refers to
    fn drop_staged_copy(&self, oid: &Oid) -> VcsResult<()> {
        if !self.state.staging.additions().values().any(|o| o == oid) {
            self.staged.delete(oid)?;
        }
        Ok(())
    }

    fn persist(&self) -> VcsResult<()> {
        self.state.refs.save(self.meta.as_ref())?;
        self.state.staging.save(self.meta.as_ref())?;
        self.meta.put(GRAPH_KEY, &self.state.graph.to_json()?)?;
        Ok(())
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("head", &self.state.refs.head())
            .field("staged", &self.state.staging.len())
            .field("commits", &self.state.graph.len())
            .field("worktree", &self.worktree)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemWorkTree;

    fn repo() -> (Repository, MemWorkTree) {
        let work = MemWorkTree::new();
        let repo = Repository::init_with(Backends::in_memory(), Box::new(work.clone())).unwrap();
        (repo, work)
    }

    #[test]
    fn test_init_state() {
        let (repo, _) = repo();
        assert_eq!(repo.current_branch(), "master");
        let head = repo.head_commit().unwrap();
        assert!(head.is_initial());
        assert_eq!(repo.head_oid().unwrap(), Commit::initial().oid().unwrap());
    }

    #[test]
    fn test_init_twice() {
        let backends = Backends::in_memory();
        Repository::init_with(backends.clone(), Box::new(MemWorkTree::new())).unwrap();
        let err = Repository::init_with(backends, Box::new(MemWorkTree::new())).unwrap_err();
        assert!(matches!(err, VcsError::AlreadyInitialized));
    }

    #[test]
    fn test_open_uninitialized() {
        let err = Repository::open_with(Backends::in_memory(), Box::new(MemWorkTree::new())).unwrap_err();
        assert!(matches!(err, VcsError::NotInitialized));
    }

    #[test]
    fn test_add_missing_file() {
        let (mut repo, _) = repo();
        assert!(matches!(repo.add("nope.txt"), Err(VcsError::FileNotFound(_))));
    }

    #[test]
    fn test_commit_requires_changes_and_message() {
        let (mut repo, work) = repo();
        assert!(matches!(repo.commit("msg"), Err(VcsError::NothingToCommit)));

        work.write("a.txt", b"a").unwrap();
        repo.add("a.txt").unwrap();
        assert!(matches!(repo.commit("  "), Err(VcsError::EmptyCommitMessage)));
        assert_eq!(repo.state().staging.len(), 1);
    }

    #[test]
    fn test_add_matching_head_clears_staging() {
        let (mut repo, work) = repo();
        work.write("a.txt", b"v1").unwrap();
        repo.add("a.txt").unwrap();
        repo.commit("v1").unwrap();

        work.write("a.txt", b"v2").unwrap();
        repo.add("a.txt").unwrap();
        assert_eq!(repo.state().staging.len(), 1);

        work.write("a.txt", b"v1").unwrap();
        repo.add("a.txt").unwrap();
        assert!(repo.state().staging.is_empty());
    }

    #[test]
    fn test_rm_tracked_file() {
        let (mut repo, work) = repo();
        work.write("a.txt", b"a").unwrap();
        repo.add("a.txt").unwrap();
        repo.commit("add a").unwrap();

        repo.rm("a.txt").unwrap();
        assert!(!work.exists("a.txt").unwrap());
        assert!(repo.state().staging.is_removed("a.txt"));

        repo.commit("remove a").unwrap();
        assert!(!repo.head_commit().unwrap().tracks("a.txt"));
    }

    #[test]
    fn test_rm_untracked_file() {
        let (mut repo, work) = repo();
        work.write("a.txt", b"a").unwrap();
        assert!(matches!(repo.rm("a.txt"), Err(VcsError::NothingToRemove(_))));
    }

    #[test]
    fn test_rm_staged_keeps_working_file() {
        let (mut repo, work) = repo();
        work.write("a.txt", b"a").unwrap();
        repo.add("a.txt").unwrap();
        repo.rm("a.txt").unwrap();
        assert!(repo.state().staging.is_empty());
        assert!(work.exists("a.txt").unwrap());
    }

    #[test]
    fn test_status_sections() {
        let (mut repo, work) = repo();
        work.write("tracked.txt", b"1").unwrap();
        work.write("gone.txt", b"g").unwrap();
        repo.add("tracked.txt").unwrap();
        repo.add("gone.txt").unwrap();
        repo.commit("base").unwrap();
        repo.branch("other").unwrap();

        work.write("tracked.txt", b"2").unwrap();
        work.remove("gone.txt").unwrap();
        work.write("new.txt", b"n").unwrap();
        work.write("staged.txt", b"s").unwrap();
        repo.add("staged.txt").unwrap();

        let status = repo.status().unwrap();
        assert_eq!(status.current_branch, "master");
        assert_eq!(status.branches, vec!["master", "other"]);
        assert_eq!(status.staged, vec!["staged.txt"]);
        assert!(status.removed.is_empty());
        assert_eq!(
            status.modified,
            vec![
                ("gone.txt".to_string(), FileChange::Deleted),
                ("tracked.txt".to_string(), FileChange::Modified),
            ]
        );
        assert_eq!(status.untracked, vec!["new.txt"]);
    }

    #[test]
    fn test_find() {
        let (mut repo, work) = repo();
        work.write("a.txt", b"a").unwrap();
        repo.add("a.txt").unwrap();
        let oid = repo.commit("needle").unwrap();

        assert_eq!(repo.find("needle").unwrap(), vec![oid]);
        assert!(matches!(repo.find("hay"), Err(VcsError::NoCommitWithMessage)));
    }

    #[test]
    fn test_checkout_file_errors() {
        let (repo, _) = repo();
        assert!(matches!(
            repo.checkout_file(None, "a.txt"),
            Err(VcsError::FileNotInCommit(_))
        ));
        assert!(matches!(
            repo.checkout_file(Some("deadbeef"), "a.txt"),
            Err(VcsError::CommitNotFound(_))
        ));
    }

    #[test]
    fn test_checkout_branch_errors() {
        let (mut repo, _) = repo();
        assert!(matches!(repo.checkout_branch("nope"), Err(VcsError::NoSuchBranch(_))));
        assert!(matches!(repo.checkout_branch("master"), Err(VcsError::AlreadyOnBranch)));
    }

    #[test]
    fn test_state_survives_reopen() {
        let backends = Backends::in_memory();
        let work = MemWorkTree::new();
        {
            let mut repo = Repository::init_with(backends.clone(), Box::new(work.clone())).unwrap();
            work.write("a.txt", b"a").unwrap();
            repo.add("a.txt").unwrap();
            repo.branch("dev").unwrap();
        }

        let repo = Repository::open_with(backends, Box::new(work)).unwrap();
        assert_eq!(repo.state().staging.additions().len(), 1);
        assert!(repo.state().refs.contains("dev"));
    }

    #[test]
    fn test_graph_rebuilt_when_missing() {
        let backends = Backends::in_memory();
        let work = MemWorkTree::new();
        let head = {
            let mut repo = Repository::init_with(backends.clone(), Box::new(work.clone())).unwrap();
            work.write("a.txt", b"a").unwrap();
            repo.add("a.txt").unwrap();
            repo.commit("one").unwrap()
        };
        backends.meta.delete(GRAPH_KEY).unwrap();

        let repo = Repository::open_with(backends.clone(), Box::new(work)).unwrap();
        assert!(repo.state().graph.contains(&head));
        assert_eq!(repo.state().graph.len(), 2);
        assert!(backends.meta.exists(GRAPH_KEY).unwrap());
    }

    #[test]
    fn test_rebuilt_graph_keeps_sibling_order() {
        let backends = Backends::in_memory();
        let work = MemWorkTree::new();
        let (root, expected) = {
            let mut repo = Repository::init_with(backends.clone(), Box::new(work.clone())).unwrap();
            let root = repo.head_oid().unwrap();
            for i in 0..6 {
                let branch = format!("b{}", i);
                repo.branch(&branch).unwrap();
                repo.checkout_branch(&branch).unwrap();
                work.write("f.txt", branch.as_bytes()).unwrap();
                repo.add("f.txt").unwrap();
                repo.commit(&branch).unwrap();
                repo.checkout_branch("master").unwrap();
            }
            (root, repo.state().graph.clone())
        };
        assert_eq!(expected.children(&root).len(), 6);
        backends.meta.delete(GRAPH_KEY).unwrap();

        let repo = Repository::open_with(backends, Box::new(work)).unwrap();
        assert_eq!(repo.state().graph.children(&root), expected.children(&root));
        assert_eq!(repo.state().graph, expected);
    }

    #[test]
    fn test_commit_timestamps_strictly_increase() {
        let (mut repo, work) = repo();
        let mut last = repo.head_commit().unwrap().timestamp;
        for i in 0..5 {
            work.write("a.txt", format!("{}", i).as_bytes()).unwrap();
            repo.add("a.txt").unwrap();
            repo.commit("again").unwrap();
            let stamp = repo.head_commit().unwrap().timestamp;
            assert!(stamp > last);
            last = stamp;
        }
    }

    #[test]
    fn test_whitespace_message_is_accepted() {
        let (mut repo, work) = repo();
        work.write("a.txt", b"a").unwrap();
        repo.add("a.txt").unwrap();
        repo.commit("   ").unwrap();
        assert_eq!(repo.head_commit().unwrap().message, "   ");

        work.write("a.txt", b"b").unwrap();
        repo.add("a.txt").unwrap();
        assert!(matches!(repo.commit(""), Err(VcsError::EmptyCommitMessage)));
    }
}
