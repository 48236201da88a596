//! Vindex declarations
//!
//! A keyspace declares its vindexes by name. Each declaration names a
//! registered vindex type and carries the parameters handed to that type's
//! factory.
//!
//! # Example
//!
//! ```toml
//! [keyspaces.user.vindexes.name_user_idx]
//! type = "lookup_hash_unique"
//! params = { table = "name_user_idx", from = "name", to = "user_id" }
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::params::VindexParams;

/// Declaration of a single vindex
#[derive(Debug, Clone, Deserialize)]
pub struct VindexDef {
    /// Vindex type (e.g., "lookup_hash", "lookup_unique")
    #[serde(rename = "type")]
    pub vindex_type: String,

    /// Type-specific parameters passed to the vindex factory
    #[serde(default)]
    pub params: VindexParams,
}

impl VindexDef {
    /// Create a declaration
    pub fn new(vindex_type: impl Into<String>, params: VindexParams) -> Self {
        Self {
            vindex_type: vindex_type.into(),
            params,
        }
    }
}

/// Schema of one keyspace
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct KeyspaceSchema {
    /// Whether rows are spread across shards
    pub sharded: bool,

    /// Vindexes by name
    pub vindexes: BTreeMap<String, VindexDef>,
}

impl KeyspaceSchema {
    /// Create a sharded keyspace with no vindexes
    pub fn sharded() -> Self {
        Self {
            sharded: true,
            vindexes: BTreeMap::new(),
        }
    }

    /// Add a vindex declaration (builder style)
    pub fn with_vindex(mut self, name: impl Into<String>, def: VindexDef) -> Self {
        self.vindexes.insert(name.into(), def);
        self
    }
}

/// Known vindex types for validation
pub const KNOWN_VINDEX_TYPES: &[&str] = &["lookup_hash", "lookup_hash_unique", "lookup", "lookup_unique"];

/// Check if a vindex type is known
pub fn is_known_vindex_type(vindex_type: &str) -> bool {
    KNOWN_VINDEX_TYPES.contains(&vindex_type)
}
