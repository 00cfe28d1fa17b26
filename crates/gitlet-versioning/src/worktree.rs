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

//! Working directory access
//!
//! Only flat regular files directly in the repository root are tracked.
//! Directories, symbolic links and the `.gitlet` directory are ignored.

use crate::{VcsError, VcsResult};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Name of the repository directory inside the working directory
pub const GITLET_DIR: &str = ".gitlet";

/// Check that `name` is a plain file name in the working-directory root
pub fn is_trackable_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && name != GITLET_DIR
        && !name.contains(['/', '\\'])
}

/// The files a repository snapshots
pub trait WorkTree: Debug {
    /// Names of the tracked-eligible files, sorted
    fn list(&self) -> VcsResult<Vec<String>>;

    /// Read a file
    ///
    /// # Errors
    ///
    /// [`VcsError::FileNotFound`] if the file does not exist or the name is
    /// not a plain file name.
    fn read(&self, name: &str) -> VcsResult<Vec<u8>>;

    /// Create or overwrite a file
    fn write(&self, name: &str, data: &[u8]) -> VcsResult<()>;

    /// Delete a file; deleting a missing file succeeds
    fn remove(&self, name: &str) -> VcsResult<()>;

    /// Check whether a file exists
    fn exists(&self, name: &str) -> VcsResult<bool> {
        match self.read(name) {
            Ok(_) => Ok(true),
            Err(VcsError::FileNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Working directory on the local filesystem
#[derive(Debug, Clone)]
pub struct FsWorkTree {
    root: PathBuf,
}

impl FsWorkTree {
    /// Working directory rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, name: &str) -> VcsResult<PathBuf> {
        if !is_trackable_name(name) {
            return Err(VcsError::FileNotFound(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

impl WorkTree for FsWorkTree {
    fn list(&self) -> VcsResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            // Names that are not valid UTF-8 cannot be tracked
            if let Ok(name) = entry.file_name().into_string() {
                if is_trackable_name(&name) {
                    names.push(name);
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> VcsResult<Vec<u8>> {
        let path = self.file_path(name)?;
        match fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(fs::read(&path)?),
            Ok(_) => Err(VcsError::FileNotFound(name.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(VcsError::FileNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, name: &str, data: &[u8]) -> VcsResult<()> {
        let path = self.file_path(name)?;
        fs::write(&path, data)?;
        debug!(file = %name, size = data.len(), "Wrote working file");
        Ok(())
    }

    fn remove(&self, name: &str) -> VcsResult<()> {
        let path = self.file_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(file = %name, "Removed working file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory working directory for tests
///
/// Clones share the same files.
#[derive(Debug, Clone, Default)]
pub struct MemWorkTree {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemWorkTree {
    /// Create an empty working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every file
    pub fn files(&self) -> BTreeMap<String, Vec<u8>> {
        self.files.read().map(|f| f.clone()).unwrap_or_default()
    }

    fn poisoned() -> VcsError {
        VcsError::Io(io::Error::other("work tree lock poisoned"))
    }
}

impl WorkTree for MemWorkTree {
    fn list(&self) -> VcsResult<Vec<String>> {
        let files = self.files.read().map_err(|_| Self::poisoned())?;
        Ok(files.keys().cloned().collect())
    }

    fn read(&self, name: &str) -> VcsResult<Vec<u8>> {
        let files = self.files.read().map_err(|_| Self::poisoned())?;
        files
            .get(name)
            .cloned()
            .ok_or_else(|| VcsError::FileNotFound(name.to_string()))
    }

    fn write(&self, name: &str, data: &[u8]) -> VcsResult<()> {
        if !is_trackable_name(name) {
            return Err(VcsError::FileNotFound(name.to_string()));
        }
        let mut files = self.files.write().map_err(|_| Self::poisoned())?;
        files.insert(name.to_string(), data.to_vec());
        Ok(())
    }

    fn remove(&self, name: &str) -> VcsResult<()> {
        let mut files = self.files.write().map_err(|_| Self::poisoned())?;
        files.remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_list_skips_dirs_and_gitlet() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join(GITLET_DIR)).unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("nested.txt"), b"n").unwrap();
        fs::write(root.join("b.txt"), b"b").unwrap();
        fs::write(root.join("a.txt"), b"a").unwrap();

        let tree = FsWorkTree::new(root);
        assert_eq!(tree.list().unwrap(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_fs_read_write_remove() {
        let temp_dir = TempDir::new().unwrap();
        let tree = FsWorkTree::new(temp_dir.path());

        tree.write("f.txt", b"hello").unwrap();
        assert_eq!(tree.read("f.txt").unwrap(), b"hello");
        assert!(tree.exists("f.txt").unwrap());

        tree.remove("f.txt").unwrap();
        tree.remove("f.txt").unwrap();
        assert!(!tree.exists("f.txt").unwrap());
        assert!(matches!(tree.read("f.txt"), Err(VcsError::FileNotFound(_))));
    }

    #[test]
    fn test_fs_rejects_paths() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("dir")).unwrap();
        let tree = FsWorkTree::new(temp_dir.path());

        assert!(matches!(tree.read("dir"), Err(VcsError::FileNotFound(_))));
        assert!(matches!(tree.read("dir/x"), Err(VcsError::FileNotFound(_))));
        assert!(matches!(tree.read(".gitlet"), Err(VcsError::FileNotFound(_))));
    }

    #[test]
    fn test_mem_tree_shared_between_clones() {
        let tree = MemWorkTree::new();
        let view = tree.clone();
        tree.write("a.txt", b"a").unwrap();
        assert_eq!(view.read("a.txt").unwrap(), b"a");
        assert_eq!(view.list().unwrap(), vec!["a.txt"]);
        assert!(tree.write("x/y", b"no").is_err());
    }

    #[test]
    fn test_trackable_names() {
        assert!(is_trackable_name("notes.txt"));
        assert!(is_trackable_name(".hidden"));
        assert!(!is_trackable_name(""));
        assert!(!is_trackable_name(".gitlet"));
        assert!(!is_trackable_name("a/b"));
    }
}
