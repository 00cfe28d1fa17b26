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

//! Test repository helper for integration tests.
//!
//! Provides a TestRepo struct that manages a temporary working directory and
//! runs gitlet commands inside it.

use crate::cli::GitletCommand;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test repository with automatic cleanup.
///
/// # Example
/// ```ignore
/// use gitlet_test_utils::TestRepo;
///
/// let repo = TestRepo::initialized();
/// repo.write_file("file.txt", "content");
/// repo.run_silent(&["add", "file.txt"]);
/// repo.run_silent(&["commit", "Add file"]);
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
}

impl TestRepo {
    /// Create a new empty test directory (not initialized as a repo).
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a new test directory and initialize it as a gitlet repository.
    pub fn initialized() -> Self {
        let repo = Self::new();
        repo.run_silent(&["init"]);
        repo
    }

    /// Get the path to the repository directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the .gitlet directory.
    pub fn gitlet_dir(&self) -> PathBuf {
        self.temp_dir.path().join(".gitlet")
    }

    /// Run gitlet with `args` and return stdout.
    pub fn run(&self, args: &[&str]) -> String {
        GitletCommand::new().in_dir(self.path()).args(args).run()
    }

    /// Run gitlet with `args` and assert it printed nothing.
    pub fn run_silent(&self, args: &[&str]) {
        GitletCommand::new().in_dir(self.path()).args(args).run_silent()
    }

    /// Write a text file to the repository.
    pub fn write_file(&self, name: &str, content: &str) {
        fs::write(self.temp_dir.path().join(name), content).expect("Failed to write file");
    }

    /// Read a text file from the repository.
    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(name)).expect("Failed to read file")
    }

    /// Check if a file exists in the repository.
    pub fn file_exists(&self, name: &str) -> bool {
        self.temp_dir.path().join(name).exists()
    }

    /// Delete a file from the repository.
    pub fn delete_file(&self, name: &str) {
        let path = self.temp_dir.path().join(name);
        if path.exists() {
            fs::remove_file(&path).expect("Failed to delete file");
        }
    }

    /// Write, stage and commit one file.
    pub fn add_and_commit(&self, name: &str, content: &str, message: &str) {
        self.write_file(name, content);
        self.run_silent(&["add", name]);
        self.run_silent(&["commit", message]);
    }

    /// Ids printed by `log`, newest first.
    pub fn log_ids(&self) -> Vec<String> {
        self.run(&["log"])
            .lines()
            .filter_map(|line| line.strip_prefix("commit "))
            .map(str::to_string)
            .collect()
    }

    /// Id of the current commit.
    pub fn head_id(&self) -> String {
        self.log_ids()
            .into_iter()
            .next()
            .expect("log printed no commits")
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_creation() {
        let repo = TestRepo::new();
        assert!(repo.path().exists());
        assert!(!repo.gitlet_dir().exists());
    }

    #[test]
    fn test_write_and_read_file() {
        let repo = TestRepo::new();
        repo.write_file("test.txt", "Hello, World!");
        assert_eq!(repo.read_file("test.txt"), "Hello, World!");
        repo.delete_file("test.txt");
        assert!(!repo.file_exists("test.txt"));
    }
}
