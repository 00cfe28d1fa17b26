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

//! CLI command helpers for testing gitlet commands.
//!
//! Provides convenient wrappers around assert_cmd for testing the gitlet CLI.
//! Every gitlet outcome exits with status 0, so helpers check stdout rather
//! than the exit code.

use assert_cmd::Command;
use std::path::Path;

/// Creates a new gitlet Command for testing.
///
/// # Example
/// ```ignore
/// use gitlet_test_utils::gitlet;
///
/// gitlet()
///     .arg("init")
///     .current_dir(temp_dir.path())
///     .assert()
///     .success();
/// ```
#[allow(deprecated)] // cargo_bin is deprecated but still works for our use case
pub fn gitlet() -> Command {
    Command::cargo_bin("gitlet").expect("gitlet binary not found")
}

/// Fluent API wrapper for common gitlet command patterns.
pub struct GitletCommand {
    cmd: Command,
}

impl GitletCommand {
    /// Create a new GitletCommand.
    pub fn new() -> Self {
        Self { cmd: gitlet() }
    }

    /// Set the working directory for the command.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    /// Add multiple arguments to the command.
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Execute the command, assert a zero exit code and return stdout.
    pub fn run(mut self) -> String {
        let output = self.cmd.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("gitlet output is not UTF-8")
    }

    /// Execute the command and assert it printed nothing.
    pub fn run_silent(self) {
        let stdout = self.run();
        assert!(stdout.is_empty(), "expected no output, got:\n{}", stdout);
    }

    /// Get the underlying Command for custom assertions.
    pub fn into_inner(self) -> Command {
        self.cmd
    }
}

impl Default for GitletCommand {
    fn default() -> Self {
        Self::new()
    }
}
