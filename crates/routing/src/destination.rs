//! Routing results
//!
//! What a vindex hands back for one input value. "No route" and "route to
//! every shard" are separate variants because callers branch on which one
//! occurred: the former drops the row from the plan, the latter scatters.

use serde::{Deserialize, Serialize};

use crate::{KeyRange, KeyspaceId};

#[cfg(test)]
#[path = "destination_test.rs"]
mod tests;

/// Result of a non-unique mapping for one input value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ksids {
    /// Zero or more concrete keyspace ids; empty means no route
    Ids(Vec<KeyspaceId>),
    /// Every keyspace id inside the range
    Range(KeyRange),
}

impl Ksids {
    /// No keyspace ids
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::Ids(Vec::new())
    }

    /// The scatter marker
    #[inline]
    #[must_use]
    pub fn full_range() -> Self {
        Self::Range(KeyRange::full())
    }

    /// Check for an empty id list
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Ids(ids) if ids.is_empty())
    }

    /// Check for the full-range scatter marker
    pub fn is_full_range(&self) -> bool {
        matches!(self, Self::Range(range) if range.is_full())
    }
}

impl Default for Ksids {
    fn default() -> Self {
        Self::none()
    }
}

/// Where to send a query for one input value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// The value maps to no shard
    None,
    /// Exactly one keyspace id
    KeyspaceId(KeyspaceId),
    /// Several keyspace ids
    KeyspaceIds(Vec<KeyspaceId>),
    /// Every shard overlapping the range
    KeyRange(KeyRange),
}

impl Destination {
    /// The scatter destination
    #[inline]
    #[must_use]
    pub fn all_shards() -> Self {
        Self::KeyRange(KeyRange::full())
    }

    /// Check for no route
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Check for a full scatter
    pub fn is_scatter(&self) -> bool {
        matches!(self, Self::KeyRange(range) if range.is_full())
    }

    /// Concrete keyspace ids, empty for ranges and no route
    pub fn keyspace_ids(&self) -> &[KeyspaceId] {
        match self {
            Self::KeyspaceId(id) => std::slice::from_ref(id),
            Self::KeyspaceIds(ids) => ids,
            Self::None | Self::KeyRange(_) => &[],
        }
    }
}

impl From<Option<KeyspaceId>> for Destination {
    fn from(id: Option<KeyspaceId>) -> Self {
        match id {
            Some(id) => Self::KeyspaceId(id),
            None => Self::None,
        }
    }
}

impl From<Ksids> for Destination {
    fn from(ksids: Ksids) -> Self {
        match ksids {
            Ksids::Ids(ids) if ids.is_empty() => Self::None,
            Ksids::Ids(ids) => Self::KeyspaceIds(ids),
            Ksids::Range(range) => Self::KeyRange(range),
        }
    }
}
