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

use std::fmt;

/// Kind of object held by an [`ObjectDatabase`](crate::ObjectDatabase)
///
/// Blobs and commits live in separate stores with the same layout; the kind
/// labels the store in log output and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// File contents
    Blob,
    /// Serialized commit
    Commit,
}

impl ObjectType {
    /// Get the type as a string identifier
    ///
    /// ```
    /// use gitlet_versioning::ObjectType;
    ///
    /// assert_eq!(ObjectType::Blob.as_str(), "blob");
    /// assert_eq!(ObjectType::Commit.as_str(), "commit");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
