//! Keyspace identifier type
//!
//! A `KeyspaceId` is the opaque routing key that decides which shard owns a
//! row. Shards own contiguous byte ranges of keyspace ids, so ids compare
//! bytewise.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, RoutingError};

/// Opaque shard routing key
///
/// Immutable once produced. Renders and serializes as lowercase hex.
///
/// # Example
///
/// ```
/// use shardgate_routing::KeyspaceId;
///
/// let ksid = KeyspaceId::from_hex("166b40b44aba4bd6").unwrap();
/// assert_eq!(ksid.len(), 8);
/// assert_eq!(ksid.to_string(), "166b40b44aba4bd6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyspaceId(Vec<u8>);

impl KeyspaceId {
    /// Create a keyspace id from raw bytes
    #[inline]
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse a keyspace id from hex text
    pub fn from_hex(text: &str) -> Result<Self> {
        hex::decode(text)
            .map(Self)
            .map_err(|e| RoutingError::invalid_keyspace_id(text, e.to_string()))
    }

    /// Raw bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into raw bytes
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Lowercase hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check for a zero-length id
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for KeyspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for KeyspaceId {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for KeyspaceId {
    #[inline]
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for KeyspaceId {
    #[inline]
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for KeyspaceId {
    #[inline]
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<KeyspaceId> for Vec<u8> {
    #[inline]
    fn from(id: KeyspaceId) -> Self {
        id.0
    }
}

impl Serialize for KeyspaceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for KeyspaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
