//! Shardgate Configuration
//!
//! Two layers of configuration feed the vindex engine:
//!
//! - [`VindexParams`]: the flat string map every vindex is built from
//! - [`VSchema`]: a TOML document declaring keyspaces and their vindexes
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse a VSchema:
//!
//! ```
//! use shardgate_config::VSchema;
//! use std::str::FromStr;
//!
//! let vschema = VSchema::from_str(r#"
//! [keyspaces.user]
//! sharded = true
//!
//! [keyspaces.user.vindexes.name_user_idx]
//! type = "lookup_hash"
//! params = { table = "name_user_idx", from = "name", to = "user_id" }
//! "#).unwrap();
//!
//! assert!(vschema.keyspace("user").unwrap().sharded);
//! ```

mod error;
mod params;
mod validation;
mod vindexes;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use params::VindexParams;
pub use vindexes::{KNOWN_VINDEX_TYPES, KeyspaceSchema, VindexDef, is_known_vindex_type};

use serde::Deserialize;

/// VSchema: keyspaces and their vindexes
///
/// All sections are optional; an empty document is a VSchema with no
/// keyspaces.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VSchema {
    /// Keyspaces by name
    pub keyspaces: BTreeMap<String, KeyspaceSchema>,
}

impl VSchema {
    /// Load a VSchema from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML, or fails
    /// validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&contents)
    }

    /// Parse a VSchema from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let vschema: VSchema = toml::from_str(s).map_err(ConfigError::ParseError)?;
        vschema.validate()?;
        Ok(vschema)
    }

    /// Validate the VSchema
    fn validate(&self) -> Result<()> {
        validation::validate_vschema(self)
    }

    /// Get a keyspace by name
    pub fn keyspace(&self, name: &str) -> Option<&KeyspaceSchema> {
        self.keyspaces.get(name)
    }

    /// Total number of declared vindexes across keyspaces
    pub fn vindex_count(&self) -> usize {
        self.keyspaces.values().map(|ks| ks.vindexes.len()).sum()
    }
}

impl FromStr for VSchema {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
