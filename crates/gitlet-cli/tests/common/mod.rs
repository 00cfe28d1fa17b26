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

//! Common test helpers for Gitlet CLI tests.
//!
//! Re-exports the shared fixtures from gitlet-test-utils and adds history
//! builders used by several test files.

#![allow(dead_code)]

pub use gitlet_test_utils::{
    assert_branch_exists, assert_on_branch, assert_repo_initialized, gitlet, status_section,
    GitletCommand, TestRepo,
};

/// Repository whose `master` and `dev` both changed `f.txt` after a
/// common base commit. `master` is checked out.
///
/// ```text
/// initial -- base -- m   (master)
///                 \
///                  d     (dev)
/// ```
pub fn diverged_repo() -> TestRepo {
    let repo = TestRepo::initialized();
    repo.add_and_commit("f.txt", "base\n", "base");
    repo.run_silent(&["branch", "dev"]);
    repo.add_and_commit("f.txt", "master\n", "m");
    repo.run_silent(&["checkout", "dev"]);
    repo.add_and_commit("f.txt", "dev\n", "d");
    repo.run_silent(&["checkout", "master"]);
    repo
}

/// Expected `status` output for the given section contents.
pub fn status_output(
    branches: &[&str],
    staged: &[&str],
    removed: &[&str],
    modified: &[&str],
    untracked: &[&str],
) -> String {
    let mut out = String::new();
    for (title, lines) in [
        ("Branches", branches),
        ("Staged Files", staged),
        ("Removed Files", removed),
        ("Modifications Not Staged For Commit", modified),
        ("Untracked Files", untracked),
    ] {
        out.push_str(&format!("=== {} ===\n", title));
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}
