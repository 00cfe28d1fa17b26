// Copyright (C) 2026  Gitlet Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Repository-level merge tests
//!
//! Each scenario runs against in-memory stores and an in-memory working
//! directory.

use gitlet_versioning::{
    Backends, ConflictType, MemWorkTree, MergeOutcome, Repository, VcsError, WorkTree,
};

struct Fixture {
    repo: Repository,
    work: MemWorkTree,
}

impl Fixture {
    fn new() -> Self {
        let work = MemWorkTree::new();
        let repo = Repository::init_with(Backends::in_memory(), Box::new(work.clone())).unwrap();
        Self { repo, work }
    }

    fn commit_files(&mut self, files: &[(&str, &str)], message: &str) {
        for (name, content) in files {
            self.work.write(name, content.as_bytes()).unwrap();
            self.repo.add(name).unwrap();
        }
        self.repo.commit(message).unwrap();
    }

    fn remove_and_commit(&mut self, name: &str, message: &str) {
        self.repo.rm(name).unwrap();
        self.repo.commit(message).unwrap();
    }

    fn read(&self, name: &str) -> Option<String> {
        self.work
            .files()
            .get(name)
            .map(|data| String::from_utf8(data.clone()).unwrap())
    }
}

/// master: init ── base ── m1
///                    \
/// other:              o1
fn diverged() -> Fixture {
    let mut fx = Fixture::new();
    fx.commit_files(&[("shared.txt", "base\n"), ("keep.txt", "keep\n")], "base");
    fx.repo.branch("other").unwrap();

    fx.commit_files(&[("shared.txt", "master\n")], "m1");

    fx.repo.checkout_branch("other").unwrap();
    fx.commit_files(&[("shared.txt", "other\n"), ("extra.txt", "extra\n")], "o1");
    fx.repo.checkout_branch("master").unwrap();
    fx
}

#[test]
fn test_fast_forward() {
    let mut fx = Fixture::new();
    fx.commit_files(&[("a.txt", "a\n")], "a");
    fx.repo.branch("ahead").unwrap();
    fx.repo.checkout_branch("ahead").unwrap();
    fx.commit_files(&[("b.txt", "b\n")], "b");
    let ahead_tip = fx.repo.head_oid().unwrap();
    fx.repo.checkout_branch("master").unwrap();
    let commits_before = fx.repo.global_log().unwrap().len();

    let report = fx.repo.merge("ahead").unwrap();

    assert_eq!(report.outcome, MergeOutcome::FastForward);
    assert_eq!(fx.repo.head_oid().unwrap(), ahead_tip);
    assert_eq!(fx.read("b.txt").as_deref(), Some("b\n"));
    assert_eq!(fx.repo.global_log().unwrap().len(), commits_before);
}

#[test]
fn test_given_is_ancestor() {
    let mut fx = Fixture::new();
    fx.repo.branch("old").unwrap();
    fx.commit_files(&[("a.txt", "a\n")], "a");
    let head = fx.repo.head_oid().unwrap();

    let report = fx.repo.merge("old").unwrap();

    assert_eq!(report.outcome, MergeOutcome::AlreadyAncestor);
    assert_eq!(fx.repo.head_oid().unwrap(), head);
    assert_eq!(fx.repo.current_branch(), "master");
}

#[test]
fn test_conflicting_merge() {
    let mut fx = diverged();
    let master_tip = fx.repo.head_oid().unwrap();
    let other_tip = fx.repo.state().refs.get("other").unwrap();

    let report = fx.repo.merge("other").unwrap();
    assert!(report.has_conflicts());

    let MergeOutcome::Merged { commit, conflicts } = report.outcome else {
        panic!("expected a merge commit");
    };
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].path, "shared.txt");
    assert_eq!(conflicts[0].conflict_type, ConflictType::ModifyModify);

    assert_eq!(
        fx.read("shared.txt").as_deref(),
        Some("<<<<<<< HEAD\nmaster\n=======\nother\n>>>>>>>")
    );
    assert_eq!(fx.read("extra.txt").as_deref(), Some("extra\n"));
    assert_eq!(fx.read("keep.txt").as_deref(), Some("keep\n"));

    let merged = fx.repo.read_commit(&commit).unwrap();
    assert!(merged.is_merge());
    assert_eq!(merged.parents.to_vec(), vec![master_tip, other_tip]);
    assert_eq!(merged.message, "Merged other into master.");
    assert_eq!(fx.repo.head_oid().unwrap(), commit);
    assert!(fx.repo.state().staging.is_empty());
}

#[test]
fn test_conflict_is_deterministic() {
    let mut one = diverged();
    let mut two = diverged();
    one.repo.merge("other").unwrap();
    two.repo.merge("other").unwrap();
    assert_eq!(one.read("shared.txt"), two.read("shared.txt"));
}

#[test]
fn test_clean_merge_takes_given_changes() {
    let mut fx = Fixture::new();
    fx.commit_files(&[("a.txt", "a\n"), ("b.txt", "b\n")], "base");
    fx.repo.branch("other").unwrap();
    fx.commit_files(&[("a.txt", "a2\n")], "master edits a");

    fx.repo.checkout_branch("other").unwrap();
    fx.remove_and_commit("b.txt", "other removes b");
    fx.commit_files(&[("c.txt", "c\n")], "other adds c");
    fx.repo.checkout_branch("master").unwrap();

    let report = fx.repo.merge("other").unwrap();
    assert!(!report.has_conflicts());

    assert_eq!(fx.read("a.txt").as_deref(), Some("a2\n"));
    assert_eq!(fx.read("b.txt"), None);
    assert_eq!(fx.read("c.txt").as_deref(), Some("c\n"));

    let head = fx.repo.head_commit().unwrap();
    assert!(head.tracks("a.txt"));
    assert!(!head.tracks("b.txt"));
    assert!(head.tracks("c.txt"));
}

#[test]
fn test_modify_delete_conflict() {
    let mut fx = Fixture::new();
    fx.commit_files(&[("f.txt", "v1\n")], "base");
    fx.repo.branch("other").unwrap();
    fx.commit_files(&[("f.txt", "v2\n")], "master edits f");
    fx.repo.checkout_branch("other").unwrap();
    fx.remove_and_commit("f.txt", "other deletes f");
    fx.repo.checkout_branch("master").unwrap();

    let report = fx.repo.merge("other").unwrap();
    let MergeOutcome::Merged { conflicts, .. } = report.outcome else {
        panic!("expected a merge commit");
    };
    assert_eq!(conflicts[0].conflict_type, ConflictType::ModifyDelete);
    assert_eq!(
        fx.read("f.txt").as_deref(),
        Some("<<<<<<< HEAD\nv2\n=======\n>>>>>>>")
    );
}

#[test]
fn test_preconditions() {
    let mut fx = diverged();

    assert!(matches!(fx.repo.merge("nope"), Err(VcsError::BranchNotFound(_))));
    assert!(matches!(fx.repo.merge("master"), Err(VcsError::SelfMerge)));

    fx.work.write("new.txt", b"new\n").unwrap();
    fx.repo.add("new.txt").unwrap();
    assert!(matches!(fx.repo.merge("other"), Err(VcsError::UncommittedChanges)));
}

#[test]
fn test_untracked_file_blocks_merge() {
    let mut fx = diverged();
    fx.work.write("extra.txt", b"local copy\n").unwrap();
    let head = fx.repo.head_oid().unwrap();
    let before = fx.work.files();

    let err = fx.repo.merge("other").unwrap_err();

    assert!(matches!(err, VcsError::UntrackedFileConflict(_)));
    assert_eq!(fx.repo.head_oid().unwrap(), head);
    assert_eq!(fx.work.files(), before);
}

/// The guard checks against the whole given tip, even for files the merge
/// itself would leave alone
#[test]
fn test_untracked_file_in_given_tip_blocks_merge() {
    let mut fx = diverged();
    fx.remove_and_commit("keep.txt", "drop keep");
    fx.work.write("keep.txt", b"recreated\n").unwrap();
    let head = fx.repo.head_oid().unwrap();

    let err = fx.repo.merge("other").unwrap_err();

    assert!(matches!(err, VcsError::UntrackedFileConflict(_)));
    assert_eq!(fx.repo.head_oid().unwrap(), head);
    assert_eq!(fx.read("keep.txt").as_deref(), Some("recreated\n"));
}
