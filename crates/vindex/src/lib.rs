//! Shardgate Vindexes
//!
//! A vindex maps column values to keyspace ids, which decide the shard a row
//! lives on. This crate provides lookup vindexes: vindexes that find the
//! keyspace id by reading a backing table through a [`VCursor`].
//!
//! # Usage
//!
//! ```ignore
//! use shardgate_vindex::{default_registry, Vindex};
//!
//! let registry = default_registry();
//! let vindex = registry.create_vindex("lookup_hash", "name_user_idx", &params)?;
//!
//! let destinations = vindex.map(&vcursor, &[Value::from("alice")]).await?;
//! ```
//!
//! # Capabilities
//!
//! - [`Vindex`]: map and verify, implemented by every vindex
//! - [`Unique`] / [`NonUnique`]: cardinality, exactly one per vindex
//! - [`Lookup`]: create/delete/update of backing table entries
//!
//! # Hashing
//!
//! The `lookup_hash*` types store integers and derive keyspace ids with
//! [`vhash`]; [`vunhash`] inverts it.

pub mod error;
pub mod hash;
pub mod lookup;
pub mod registry;
pub mod vindex;
pub mod vschema;

pub use error::{Result, VindexError};
pub use hash::{HASHED_KSID_LEN, KsidError, vhash, vunhash};
pub use lookup::{
    LookupHash, LookupHashUnique, LookupNonUnique, LookupTable, LookupUnique, NonUniqueLookup,
    UniqueLookup,
};
pub use registry::{VindexFactory, VindexRegistry, default_registry};
pub use vindex::{Lookup, NonUnique, Unique, Vindex};
pub use vschema::{KeyspaceVindexes, build_keyspace_vindexes, build_vschema};

pub use shardgate_query::VCursor;
