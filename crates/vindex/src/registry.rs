//! Vindex Registry - Dynamic vindex creation
//!
//! The registry maps vindex type names to factories, so a VSchema can
//! name the vindex type it wants and get a ready instance back.
//!
//! The registry is a plain value: build it once at startup, then share it
//! read-only (by reference or behind an `Arc`).
//!
//! # Example
//!
//! ```ignore
//! let mut registry = VindexRegistry::new();
//! registry.register("lookup_hash", LookupHashFactory);
//!
//! // From VSchema
//! let vindex = registry.create_vindex("lookup_hash", "name_user_idx", &params)?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use shardgate_config::VindexParams;
use tracing::debug;

use crate::error::{Result, VindexError};
use crate::lookup::{LookupFactory, LookupHashFactory, LookupHashUniqueFactory, LookupUniqueFactory};
use crate::vindex::Vindex;

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;

/// Factory trait for creating vindexes
///
/// Implement this trait to register custom vindex types with the registry.
pub trait VindexFactory: Send + Sync {
    /// Create a vindex instance
    ///
    /// # Arguments
    /// * `name` - Instance name, as declared in the VSchema
    /// * `params` - Instance parameters
    ///
    /// # Errors
    /// Returns `VindexError::Config` if the parameters are invalid
    fn create(&self, name: &str, params: &VindexParams) -> Result<Arc<dyn Vindex>>;

    /// Type name this factory builds (for error messages)
    fn name(&self) -> &'static str;
}

/// Registry for vindex factories
///
/// Maps vindex type names (e.g., "lookup_hash", "lookup_unique") to their
/// factory implementations.
pub struct VindexRegistry {
    factories: HashMap<String, Box<dyn VindexFactory>>,
}

impl VindexRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a vindex factory
    ///
    /// # Panics
    /// Panics if a factory is already registered with this name.
    /// Use `try_register` for fallible registration.
    pub fn register<F: VindexFactory + 'static>(&mut self, type_name: &str, factory: F) {
        if !self.try_register(type_name, factory) {
            panic!("Vindex factory '{}' already registered", type_name);
        }
    }

    /// Try to register a vindex factory
    ///
    /// Returns `false` if a factory is already registered with this name.
    pub fn try_register<F: VindexFactory + 'static>(&mut self, type_name: &str, factory: F) -> bool {
        if self.factories.contains_key(type_name) {
            return false;
        }
        debug!(vindex_type = type_name, factory = factory.name(), "registered vindex factory");
        self.factories
            .insert(type_name.to_string(), Box::new(factory));
        true
    }

    /// Create a vindex from its type name, instance name and parameters
    ///
    /// # Errors
    /// - `VindexError::UnknownVindexType` if the type is not registered
    /// - whatever the factory returns if the parameters are rejected
    pub fn create_vindex(
        &self,
        type_name: &str,
        name: &str,
        params: &VindexParams,
    ) -> Result<Arc<dyn Vindex>> {
        let factory = self.factories.get(type_name).ok_or_else(|| {
            VindexError::unknown_vindex_type(type_name, &self.available_types())
        })?;

        let vindex = factory.create(name, params)?;
        debug!(vindex_type = type_name, vindex = name, cost = vindex.cost(), "created vindex");
        Ok(vindex)
    }

    /// Check if a vindex type is registered
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Registered vindex types, sorted
    pub fn available_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        types.sort_unstable();
        types
    }

    /// Get the number of registered factories
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for VindexRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a registry with all built-in vindexes registered
///
/// Includes `lookup_hash`, `lookup_hash_unique`, `lookup` and
/// `lookup_unique`.
pub fn default_registry() -> VindexRegistry {
    let mut registry = VindexRegistry::new();
    registry.register("lookup_hash", LookupHashFactory);
    registry.register("lookup_hash_unique", LookupHashUniqueFactory);
    registry.register("lookup", LookupFactory);
    registry.register("lookup_unique", LookupUniqueFactory);
    registry
}
