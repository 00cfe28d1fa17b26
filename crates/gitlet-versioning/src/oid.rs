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

//! Object identifiers
//!
//! Every blob and commit is named by the SHA-256 digest of its bytes, written
//! as 64 lowercase hex characters.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of an object id in hex characters
pub const OID_HEX_LEN: usize = 64;

/// SHA-256 object identifier
///
/// Human-readable encodings (JSON) carry the hex string; binary encodings
/// carry the 32 raw bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid([u8; 32]);

impl Oid {
    /// Create an OID by hashing the given data
    ///
    /// # Examples
    ///
    /// ```
    /// use gitlet_versioning::Oid;
    ///
    /// let oid = Oid::hash(b"test content");
    /// assert_eq!(oid, Oid::hash(b"test content"));
    /// assert_eq!(oid.to_hex().len(), 64);
    /// ```
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Oid(bytes)
    }

    /// Create OID from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Oid(bytes)
    }

    /// Get the raw bytes of the OID
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert OID to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Create OID from a full hex string
    ///
    /// # Errors
    ///
    /// Returns error if the string is not 64 hex characters
    ///
    /// ```
    /// use gitlet_versioning::Oid;
    ///
    /// let oid = Oid::hash(b"test");
    /// assert_eq!(Oid::from_hex(&oid.to_hex()).unwrap(), oid);
    /// assert!(Oid::from_hex("abc").is_err());
    /// ```
    pub fn from_hex(s: &str) -> anyhow::Result<Self> {
        if s.len() != OID_HEX_LEN {
            anyhow::bail!("OID hex string must be {} characters, got {}", OID_HEX_LEN, s.len());
        }

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Oid(bytes))
    }

    /// First `len` hex characters, as shown in merge log lines
    pub fn short(&self, len: usize) -> String {
        let mut hex = self.to_hex();
        hex.truncate(len.min(OID_HEX_LEN));
        hex
    }

    /// Whether `s` could be the start of an object id
    pub fn is_hex_prefix(s: &str) -> bool {
        s.len() <= OID_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl FromStr for Oid {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Oid::from_hex(s)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self.short(12))
    }
}

impl Serialize for Oid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Oid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let hex = String::deserialize(deserializer)?;
            Oid::from_hex(&hex).map_err(de::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Oid)
        }
    }
}

impl From<[u8; 32]> for Oid {
    fn from(bytes: [u8; 32]) -> Self {
        Oid(bytes)
    }
}
