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

//! Local filesystem storage backend
//!
//! Two directory layouts are supported:
//!
//! ```text
//! Sharded (object ids)          Flat (metadata)
//! root/                         root/
//!   3f/                           HEAD
//!     a2c1...  (key 3fa2c1...)    branches/
//!   7b/                             master
//!     00aa...                     staging/
//!                                   added
//! ```
//!
//! A sharded key is split after its second character, so all objects whose id
//! starts with the same two hex digits share a directory. Prefix listings only
//! scan the matching shard, which is what abbreviated commit ids rely on.
//!
//! Writes go to a temporary sibling file which is then renamed into place,
//! so readers never observe a partially written entry.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gitlet_storage::{StorageBackend, LocalBackend};
//!
//! # fn main() -> gitlet_storage::StorageResult<()> {
//! let objects = LocalBackend::sharded(".gitlet/blobs")?;
//! objects.put("3fa2c1d4", b"file content")?;
//!
//! let meta = LocalBackend::flat(".gitlet")?;
//! meta.put("branches/master", b"3fa2c1d4")?;
//! # Ok(())
//! # }
//! ```

use crate::{check_key, StorageBackend, StorageError, StorageResult};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const TEMP_SUFFIX: &str = ".gitlet-tmp";

/// How keys map onto paths below the backend root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `root/<key[..2]>/<key[2..]>`
    Sharded,
    /// `root/<key>` with `/` as the directory separator
    Flat,
}

/// Local filesystem storage backend
#[derive(Clone)]
pub struct LocalBackend {
    root: PathBuf,
    layout: Layout,
}

impl LocalBackend {
    /// Open a backend with the given layout, creating the root if needed
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Backend`] if `root` exists but is not a
    /// directory.
    pub fn new<P: AsRef<Path>>(root: P, layout: Layout) -> StorageResult<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.exists() {
            fs::create_dir_all(&root)?;
        } else if !root.is_dir() {
            return Err(StorageError::backend(format!(
                "path exists but is not a directory: {}",
                root.display()
            )));
        }

        Ok(LocalBackend { root, layout })
    }

    /// Open a sharded backend (content-addressed objects)
    pub fn sharded<P: AsRef<Path>>(root: P) -> StorageResult<Self> {
        Self::new(root, Layout::Sharded)
    }

    /// Open a flat backend (repository metadata)
    pub fn flat<P: AsRef<Path>>(root: P) -> StorageResult<Self> {
        Self::new(root, Layout::Flat)
    }

    /// Get the root path for this backend
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the layout of this backend
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Map a key to its on-disk path
    ///
    /// For key "3fa2c1" in a sharded backend: `root/3f/a2c1`.
    /// For key "branches/master" in a flat backend: `root/branches/master`.
    fn entry_path(&self, key: &str) -> StorageResult<PathBuf> {
        check_key(key)?;

        match self.layout {
            Layout::Sharded => {
                if key.len() < 3 || !key.is_ascii() || key.contains(['/', '\\']) {
                    return Err(StorageError::invalid_key(format!(
                        "sharded keys must be at least 3 ASCII characters without separators: {key}"
                    )));
                }
                Ok(self.root.join(&key[..2]).join(&key[2..]))
            }
            Layout::Flat => {
                let relative = Path::new(key);
                let well_formed = !key.ends_with(TEMP_SUFFIX)
                    && relative
                        .components()
                        .all(|c| matches!(c, Component::Normal(_)));
                if !well_formed {
                    return Err(StorageError::invalid_key(format!(
                        "flat keys must be relative paths: {key}"
                    )));
                }
                Ok(self.root.join(relative))
            }
        }
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(TEMP_SUFFIX);
        path.with_file_name(name)
    }

    /// Collect every key under `dir`, where `key_prefix` is the key of `dir`
    fn walk_flat(dir: &Path, key_prefix: &str, out: &mut Vec<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(TEMP_SUFFIX) {
                continue;
            }

            let key = format!("{key_prefix}{name}");
            if entry.file_type()?.is_dir() {
                Self::walk_flat(&entry.path(), &format!("{key}/"), out)?;
            } else {
                out.push(key);
            }
        }
        Ok(())
    }

    fn list_shard(&self, shard: &str, out: &mut Vec<String>) -> io::Result<()> {
        let dir = self.root.join(shard);
        if !dir.is_dir() {
            return Ok(());
        }
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.ends_with(TEMP_SUFFIX) || !entry.file_type()?.is_file() {
                continue;
            }
            out.push(format!("{shard}{name}"));
        }
        Ok(())
    }
}

impl fmt::Debug for LocalBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalBackend")
            .field("root", &self.root)
            .field("layout", &self.layout)
            .finish()
    }
}

impl StorageBackend for LocalBackend {
    fn get(&self, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.entry_path(key)?;

        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::not_found(key)),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, data: &[u8]) -> StorageResult<()> {
        let path = self.entry_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = Self::temp_path(&path);
        let _ = fs::remove_file(&temp_path);

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, &path)?;
        debug!(key = %key, size = data.len(), "Wrote entry");
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.entry_path(key)?;
        Ok(path.is_file())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.entry_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list_objects(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let mut results = Vec::new();

        match self.layout {
            Layout::Sharded if prefix.len() >= 2 && prefix.is_char_boundary(2) => {
                self.list_shard(&prefix[..2], &mut results)?;
            }
            Layout::Sharded => {
                for entry in fs::read_dir(&self.root)? {
                    let entry = entry?;
                    let shard = entry.file_name().to_string_lossy().into_owned();
                    if shard.len() == 2 && entry.file_type()?.is_dir() {
                        self.list_shard(&shard, &mut results)?;
                    }
                }
            }
            Layout::Flat => {
                // Start from the deepest directory named by the prefix
                let (dir_key, start) = match prefix.rfind('/') {
                    Some(idx) => (&prefix[..=idx], self.root.join(&prefix[..idx])),
                    None => ("", self.root.clone()),
                };
                if start.is_dir() {
                    Self::walk_flat(&start, dir_key, &mut results)?;
                }
            }
        }

        results.retain(|key| key.starts_with(prefix));
        results.sort();
        Ok(results)
    }
}
