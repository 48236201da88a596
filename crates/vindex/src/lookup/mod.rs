//! Lookup vindexes
//!
//! A lookup vindex finds keyspace ids by reading a backing table that maps
//! column values ("from") to a keyspace column ("to"). Four variants are
//! registered by default:
//!
//! | type                 | cardinality | "to" column holds      | cost |
//! |----------------------|-------------|------------------------|------|
//! | `lookup_hash`        | non-unique  | `u64`, hashed to ksid  | 20   |
//! | `lookup_hash_unique` | unique      | `u64`, hashed to ksid  | 10   |
//! | `lookup`             | non-unique  | keyspace id bytes      | 20   |
//! | `lookup_unique`      | unique      | keyspace id bytes      | 10   |

mod codec;
mod non_unique;
mod table;
mod unique;

use std::sync::Arc;

use shardgate_config::VindexParams;

use crate::error::Result;
use crate::registry::VindexFactory;
use crate::vindex::Vindex;

pub use codec::{Direct, Hashed, KsidCodec};
pub use non_unique::{LookupHash, LookupNonUnique, NonUniqueLookup};
pub use table::LookupTable;
pub use unique::{LookupHashUnique, LookupUnique, UniqueLookup};

/// Factory for [`LookupHash`]
pub struct LookupHashFactory;

impl VindexFactory for LookupHashFactory {
    fn create(&self, name: &str, params: &VindexParams) -> Result<Arc<dyn Vindex>> {
        Ok(Arc::new(LookupHash::new(name, params)?))
    }

    fn name(&self) -> &'static str {
        "lookup_hash"
    }
}

/// Factory for [`LookupHashUnique`]
pub struct LookupHashUniqueFactory;

impl VindexFactory for LookupHashUniqueFactory {
    fn create(&self, name: &str, params: &VindexParams) -> Result<Arc<dyn Vindex>> {
        Ok(Arc::new(LookupHashUnique::new(name, params)?))
    }

    fn name(&self) -> &'static str {
        "lookup_hash_unique"
    }
}

/// Factory for [`LookupNonUnique`]
pub struct LookupFactory;

impl VindexFactory for LookupFactory {
    fn create(&self, name: &str, params: &VindexParams) -> Result<Arc<dyn Vindex>> {
        Ok(Arc::new(LookupNonUnique::new(name, params)?))
    }

    fn name(&self) -> &'static str {
        "lookup"
    }
}

/// Factory for [`LookupUnique`]
pub struct LookupUniqueFactory;

impl VindexFactory for LookupUniqueFactory {
    fn create(&self, name: &str, params: &VindexParams) -> Result<Arc<dyn Vindex>> {
        Ok(Arc::new(LookupUnique::new(name, params)?))
    }

    fn name(&self) -> &'static str {
        "lookup_unique"
    }
}
