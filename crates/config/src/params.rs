//! Vindex parameters
//!
//! Every vindex is constructed from a flat string-to-string map. Each
//! vindex type interprets the keys it knows and ignores the rest.
//!
//! # Example
//!
//! ```toml
//! [keyspaces.user.vindexes.name_user_idx]
//! type = "lookup_hash"
//! params = { table = "name_user_idx", from = "name", to = "user_id", scatter_if_absent = "true" }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ConfigError, Result};

#[cfg(test)]
#[path = "params_test.rs"]
mod tests;

/// String-keyed, string-valued vindex parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VindexParams {
    values: HashMap<String, String>,
}

impl VindexParams {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a parameter
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a parameter
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a parameter that must be present
    ///
    /// # Errors
    /// Returns `ConfigError::MissingParam` if absent.
    pub fn required(&self, key: &str) -> Result<&str> {
        self.get_str(key)
            .ok_or_else(|| ConfigError::missing_param(key))
    }

    /// Get a boolean flag
    ///
    /// An absent flag is `false`. A present flag must be exactly `"true"`
    /// or `"false"`.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidBool` echoing the key and value otherwise.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.get_str(key) {
            None | Some("false") => Ok(false),
            Some("true") => Ok(true),
            Some(other) => Err(ConfigError::invalid_bool(key, other)),
        }
    }

    /// Get a boolean flag that may be spelled under either of two keys
    ///
    /// The first key wins when both are present.
    pub fn get_bool_either(&self, key: &str, alias: &str) -> Result<bool> {
        if self.contains(key) {
            self.get_bool(key)
        } else {
            self.get_bool(alias)
        }
    }

    /// Check if a parameter is present
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no parameters
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over parameters
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VindexParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for VindexParams {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}
