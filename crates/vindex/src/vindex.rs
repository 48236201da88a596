//! Vindex capability traits
//!
//! Every vindex implements [`Vindex`]. On top of that it carries exactly
//! one cardinality capability, [`Unique`] or [`NonUnique`], and optionally
//! [`Lookup`] when it owns a backing table that must follow row changes.
//!
//! Capabilities are discovered through the `as_*` accessors rather than
//! downcasting, so a caller holding an `Arc<dyn Vindex>` can ask for the
//! mutation interface without knowing the concrete type:
//!
//! ```ignore
//! if let Some(lookup) = vindex.as_lookup() {
//!     lookup.create(&vcursor, &rows, &ksids, false).await?;
//! }
//! ```

use std::fmt;

use async_trait::async_trait;
use shardgate_query::{VCursor, Value};
use shardgate_routing::{Destination, KeyspaceId, Ksids};

use crate::error::Result;

/// A named mapping from column values to keyspace ids
///
/// Implementations are immutable after construction and safe to share
/// across tasks.
#[async_trait]
pub trait Vindex: Send + Sync + fmt::Debug {
    /// Vindex instance name
    fn name(&self) -> &str;

    /// Relative planner cost; lower is preferred
    fn cost(&self) -> u32;

    /// Map each id to its routing destination, in input order
    async fn map(&self, vcursor: &dyn VCursor, ids: &[Value]) -> Result<Vec<Destination>>;

    /// Check whether each `ids[i]` maps to `ksids[i]`
    async fn verify(
        &self,
        vcursor: &dyn VCursor,
        ids: &[Value],
        ksids: &[KeyspaceId],
    ) -> Result<Vec<bool>>;

    /// Unique capability, if this vindex has it
    fn as_unique(&self) -> Option<&dyn Unique> {
        None
    }

    /// Non-unique capability, if this vindex has it
    fn as_non_unique(&self) -> Option<&dyn NonUnique> {
        None
    }

    /// Mutation capability, if this vindex owns a lookup table
    fn as_lookup(&self) -> Option<&dyn Lookup> {
        None
    }

    /// Whether each id maps to at most one keyspace id
    fn is_unique(&self) -> bool {
        self.as_unique().is_some()
    }

    /// JSON description of the vindex configuration
    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

/// At most one keyspace id per input value
#[async_trait]
pub trait Unique: Vindex {
    /// Map each id to its keyspace id; `None` means no route
    async fn map_unique(
        &self,
        vcursor: &dyn VCursor,
        ids: &[Value],
    ) -> Result<Vec<Option<KeyspaceId>>>;
}

/// Zero or more keyspace ids per input value
#[async_trait]
pub trait NonUnique: Vindex {
    /// Map each id to its keyspace ids or to a key range
    async fn map_ksids(&self, vcursor: &dyn VCursor, ids: &[Value]) -> Result<Vec<Ksids>>;
}

/// A vindex backed by a table it keeps in step with row changes
#[async_trait]
pub trait Lookup: Vindex {
    /// Insert one entry per row: `rows[i]` (the "from" values) maps to `ksids[i]`
    ///
    /// With `ignore_mode`, rows that already exist are skipped instead of
    /// failing the statement.
    async fn create(
        &self,
        vcursor: &dyn VCursor,
        rows: &[Vec<Value>],
        ksids: &[KeyspaceId],
        ignore_mode: bool,
    ) -> Result<()>;

    /// Delete the entries mapping each row to `ksid`
    async fn delete(&self, vcursor: &dyn VCursor, rows: &[Vec<Value>], ksid: &KeyspaceId)
    -> Result<()>;

    /// Move the entry for `ksid` from `old_values` to `new_values`
    async fn update(
        &self,
        vcursor: &dyn VCursor,
        old_values: &[Value],
        ksid: &KeyspaceId,
        new_values: &[Value],
    ) -> Result<()>;
}
