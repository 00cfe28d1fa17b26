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

//! Custom test assertions for Gitlet tests.

use crate::cli::GitletCommand;
use std::path::Path;

/// Assert that a repository is properly initialized.
///
/// Checks the `.gitlet` layout written by `init`.
pub fn assert_repo_initialized(path: &Path) {
    let gitlet_dir = path.join(".gitlet");
    assert!(gitlet_dir.is_dir(), ".gitlet directory should exist at {:?}", path);
    assert!(gitlet_dir.join("HEAD").is_file(), "HEAD file should exist");
    assert!(
        gitlet_dir.join("branches").join("master").is_file(),
        "master branch should exist"
    );
    assert!(gitlet_dir.join("commits").is_dir(), "commits directory should exist");
}

/// Lines of one `=== Title ===` section of `status`.
pub fn status_section(repo_path: &Path, title: &str) -> Vec<String> {
    let stdout = GitletCommand::new().in_dir(repo_path).args(&["status"]).run();
    let header = format!("=== {} ===", title);
    stdout
        .lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Assert that we are on a specific branch.
pub fn assert_on_branch(repo_path: &Path, branch_name: &str) {
    let branches = status_section(repo_path, "Branches");
    assert!(
        branches.contains(&format!("*{}", branch_name)),
        "expected to be on {}, branches: {:?}",
        branch_name,
        branches
    );
}

/// Assert that a branch exists in the repository.
pub fn assert_branch_exists(repo_path: &Path, branch_name: &str) {
    let branches = status_section(repo_path, "Branches");
    assert!(
        branches
            .iter()
            .any(|b| b.trim_start_matches('*') == branch_name),
        "branch {} should exist, branches: {:?}",
        branch_name,
        branches
    );
}

/// Assert that a gitlet command prints exactly `expected` (plus newline).
#[macro_export]
macro_rules! assert_gitlet_prints {
    ($repo:expr, $expected:expr, $($arg:expr),+ $(,)?) => {
        $crate::gitlet()
            $(.arg($arg))+
            .current_dir($repo.path())
            .assert()
            .success()
            .stdout(format!("{}\n", $expected))
    };
}
