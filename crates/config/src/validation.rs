//! VSchema validation
//!
//! Checks what can be checked without constructing vindexes:
//! - Every declared vindex type is known
//! - Unsharded keyspaces declare no vindexes
//!
//! Parameter-level checks belong to each vindex type and run when the
//! vindex is built.

use crate::VSchema;
use crate::error::{ConfigError, Result};
use crate::vindexes::is_known_vindex_type;

/// Validate the entire VSchema
pub fn validate_vschema(vschema: &VSchema) -> Result<()> {
    for (keyspace, schema) in &vschema.keyspaces {
        for (name, def) in &schema.vindexes {
            if !schema.sharded {
                return Err(ConfigError::vindex_in_unsharded_keyspace(keyspace, name));
            }
            if !is_known_vindex_type(&def.vindex_type) {
                return Err(ConfigError::unknown_vindex_type(name, &def.vindex_type));
            }
        }
    }
    Ok(())
}
