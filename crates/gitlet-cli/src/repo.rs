//! Repository discovery for CLI commands
//!
//! Commands operate on the repository rooted at the current directory.

use anyhow::{Context, Result};
use gitlet_versioning::{Repository, GITLET_DIR};
use std::path::{Path, PathBuf};

/// Directory the command was started in
pub fn current_root() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to read the current directory")
}

/// Check for a `.gitlet` directory under `root`
pub fn is_initialized(root: &Path) -> bool {
    root.join(GITLET_DIR).is_dir()
}

/// Open the repository in the current directory
pub fn open_repository() -> Result<Repository> {
    let root = current_root()?;
    Ok(Repository::open(&root)?)
}
