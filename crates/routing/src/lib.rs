//! Shardgate Routing - keyspace ids and key ranges
//!
//! Every row in a sharded keyspace is owned by the shard whose key range
//! contains the row's keyspace id. Vindexes translate column values into
//! these ids; this crate holds the types they produce.
//!
//! # Example
//!
//! ```
//! use shardgate_routing::{Destination, KeyRange, KeyspaceId, Ksids};
//!
//! let shard: KeyRange = "-80".parse().unwrap();
//! let ksid = KeyspaceId::from_hex("166b40b44aba4bd6").unwrap();
//! assert!(shard.contains(&ksid));
//!
//! // A vindex that cannot locate a row may ask for a scatter
//! let dest = Destination::from(Ksids::full_range());
//! assert!(dest.is_scatter());
//! ```

mod destination;
mod error;
mod key_range;
mod keyspace_id;

pub use destination::{Destination, Ksids};
pub use error::{Result, RoutingError};
pub use key_range::KeyRange;
pub use keyspace_id::KeyspaceId;
