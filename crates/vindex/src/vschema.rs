//! Building vindexes from a VSchema
//!
//! [`shardgate_config::VSchema`] only declares vindexes. This module hands
//! each declaration to the registry and collects the live instances per
//! keyspace.

use std::collections::BTreeMap;
use std::sync::Arc;

use shardgate_config::{KeyspaceSchema, VSchema};
use tracing::info;

use crate::error::{Result, VindexError};
use crate::registry::VindexRegistry;
use crate::vindex::Vindex;

/// Live vindexes of one keyspace, by name
#[derive(Debug, Clone, Default)]
pub struct KeyspaceVindexes {
    vindexes: BTreeMap<String, Arc<dyn Vindex>>,
}

impl KeyspaceVindexes {
    /// Get a vindex by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Vindex>> {
        self.vindexes.get(name)
    }

    /// Iterate over vindexes in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Vindex>)> {
        self.vindexes.iter().map(|(name, v)| (name.as_str(), v))
    }

    /// Number of vindexes
    pub fn len(&self) -> usize {
        self.vindexes.len()
    }

    /// Check if the keyspace has no vindexes
    pub fn is_empty(&self) -> bool {
        self.vindexes.is_empty()
    }

    /// JSON object mapping each vindex name to its description
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        let mut out = serde_json::Map::new();
        for (name, vindex) in &self.vindexes {
            out.insert(name.clone(), vindex.to_json()?);
        }
        Ok(serde_json::Value::Object(out))
    }
}

/// Build every vindex declared by one keyspace
///
/// # Errors
/// `VindexError::Build` naming the keyspace and vindex of the first
/// declaration that fails.
pub fn build_keyspace_vindexes(
    keyspace: &str,
    schema: &KeyspaceSchema,
    registry: &VindexRegistry,
) -> Result<KeyspaceVindexes> {
    let mut vindexes = BTreeMap::new();
    for (name, def) in &schema.vindexes {
        let vindex = registry
            .create_vindex(&def.vindex_type, name, &def.params)
            .map_err(|e| VindexError::build(keyspace, name, e))?;
        vindexes.insert(name.clone(), vindex);
    }

    info!(keyspace, vindexes = vindexes.len(), "built keyspace vindexes");
    Ok(KeyspaceVindexes { vindexes })
}

/// Build the vindexes of every keyspace in a VSchema
pub fn build_vschema(
    vschema: &VSchema,
    registry: &VindexRegistry,
) -> Result<BTreeMap<String, KeyspaceVindexes>> {
    vschema
        .keyspaces
        .iter()
        .map(|(keyspace, schema)| {
            build_keyspace_vindexes(keyspace, schema, registry).map(|v| (keyspace.clone(), v))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_registry;
    use shardgate_config::{VindexDef, VindexParams};
    use std::str::FromStr;

    const VSCHEMA: &str = r#"
[keyspaces.user]
sharded = true

[keyspaces.user.vindexes.name_user_idx]
type = "lookup_hash"
params = { table = "lookup.name_user_idx", from = "name", to = "user_id", scatter_if_absent = "true" }

[keyspaces.user.vindexes.email_user_idx]
type = "lookup_unique"
params = { table = "lookup.email_user_idx", from = "email", to = "keyspace_id", autocommit = "true" }

[keyspaces.lookup]
sharded = false
"#;

    fn lookup_params() -> VindexParams {
        VindexParams::new()
            .with("table", "t")
            .with("from", "fromc")
            .with("to", "toc")
    }

    #[test]
    fn test_build_vschema() {
        let vschema = VSchema::from_str(VSCHEMA).unwrap();
        let built = build_vschema(&vschema, &default_registry()).unwrap();

        assert_eq!(built.len(), 2);
        assert!(built["lookup"].is_empty());

        let user = &built["user"];
        assert_eq!(user.len(), 2);
        let names: Vec<&str> = user.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["email_user_idx", "name_user_idx"]);

        let name_idx = user.get("name_user_idx").unwrap();
        assert_eq!(name_idx.name(), "name_user_idx");
        assert!(!name_idx.is_unique());
        assert!(user.get("email_user_idx").unwrap().is_unique());
        assert!(user.get("missing").is_none());
    }

    #[test]
    fn test_keyspace_to_json() {
        let vschema = VSchema::from_str(VSCHEMA).unwrap();
        let user = build_keyspace_vindexes(
            "user",
            vschema.keyspace("user").unwrap(),
            &default_registry(),
        )
        .unwrap();

        let json = user.to_json().unwrap();
        assert_eq!(json["name_user_idx"]["table"], "lookup.name_user_idx");
        assert_eq!(json["name_user_idx"]["from_columns"][0], "name");
        assert_eq!(json["email_user_idx"]["autocommit"], true);
    }

    #[test]
    fn test_build_error_names_keyspace_and_vindex() {
        let schema = KeyspaceSchema::sharded().with_vindex(
            "bad_idx",
            VindexDef::new(
                "lookup_hash_unique",
                lookup_params().with("ignore", "true"),
            ),
        );
        let err = build_keyspace_vindexes("user", &schema, &default_registry()).unwrap_err();
        assert!(matches!(
            err,
            VindexError::Build { ref keyspace, ref vindex, .. } if keyspace == "user" && vindex == "bad_idx"
        ));
        assert_eq!(
            err.to_string(),
            "keyspace 'user' vindex 'bad_idx': ignore cannot be true for a unique lookup vindex"
        );
    }

    #[test]
    fn test_build_unregistered_type() {
        let schema = KeyspaceSchema::sharded()
            .with_vindex("idx", VindexDef::new("lookup", lookup_params()));
        let err = build_keyspace_vindexes("user", &schema, &VindexRegistry::new()).unwrap_err();
        assert!(err.to_string().contains("unknown vindex type 'lookup'"));
    }
}
