//! Key ranges
//!
//! A shard owns the half-open range `[start, end)` of keyspace ids. An empty
//! bound is unbounded on that side, so the range with both bounds empty
//! covers every shard and doubles as the scatter marker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::KeyspaceId;
use crate::error::{Result, RoutingError};

#[cfg(test)]
#[path = "key_range_test.rs"]
mod tests;

/// Half-open range of keyspace ids
///
/// Text form is `<start hex>-<end hex>`, e.g. `-80`, `40-80`, `80-`, and
/// `-` for the full range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRange {
    /// Inclusive lower bound; empty means unbounded
    #[serde(with = "hex_bytes", default)]
    start: Vec<u8>,
    /// Exclusive upper bound; empty means unbounded
    #[serde(with = "hex_bytes", default)]
    end: Vec<u8>,
}

impl KeyRange {
    /// The range covering every keyspace id
    #[inline]
    #[must_use]
    pub fn full() -> Self {
        Self::default()
    }

    /// Create a range from bounds
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyRange` if both bounds are set and `start >= end`.
    pub fn new(start: impl Into<Vec<u8>>, end: impl Into<Vec<u8>>) -> Result<Self> {
        let start = start.into();
        let end = end.into();
        if !start.is_empty() && !end.is_empty() && start >= end {
            return Err(RoutingError::invalid_key_range(
                format!("{}-{}", hex::encode(&start), hex::encode(&end)),
                "start must be below end",
            ));
        }
        Ok(Self { start, end })
    }

    /// Inclusive lower bound
    #[inline]
    pub fn start(&self) -> &[u8] {
        &self.start
    }

    /// Exclusive upper bound
    #[inline]
    pub fn end(&self) -> &[u8] {
        &self.end
    }

    /// Check if this range covers every keyspace id
    #[inline]
    pub fn is_full(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    /// Check if a keyspace id falls inside this range
    pub fn contains(&self, id: &KeyspaceId) -> bool {
        let id = id.as_bytes();
        (self.start.is_empty() || id >= self.start.as_slice())
            && (self.end.is_empty() || id < self.end.as_slice())
    }
}

impl fmt::Display for KeyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", hex::encode(&self.start), hex::encode(&self.end))
    }
}

impl FromStr for KeyRange {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| RoutingError::invalid_key_range(s, "expected '<start>-<end>'"))?;
        let start =
            hex::decode(start).map_err(|e| RoutingError::invalid_key_range(s, e.to_string()))?;
        let end = hex::decode(end).map_err(|e| RoutingError::invalid_key_range(s, e.to_string()))?;
        Self::new(start, end).map_err(|_| RoutingError::invalid_key_range(s, "start must be below end"))
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        hex::decode(text).map_err(serde::de::Error::custom)
    }
}
