//! Vindex error types

use shardgate_config::ConfigError;
use shardgate_query::{QueryError, Value};
use thiserror::Error;

use crate::hash::KsidError;

/// Result type for vindex operations
pub type Result<T> = std::result::Result<T, VindexError>;

/// Errors that can occur while building or using a vindex
#[derive(Debug, Error)]
pub enum VindexError {
    /// Invalid, missing or contradictory configuration; construction time only
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A keyspace id failed to decode
    #[error("{op}: {source}")]
    Decode {
        /// Operation that was decoding (e.g. "lookup.Verify.vunhash")
        op: &'static str,
        /// Underlying decode error
        #[source]
        source: KsidError,
    },

    /// The query cursor failed; never retried here
    #[error("{op}: {source}")]
    Execution {
        /// Operation that issued the statement (e.g. "lookup.Map")
        op: &'static str,
        /// Error returned by the cursor
        #[source]
        source: QueryError,
    },

    /// A unique vindex found more than one backing row for an id
    #[error("Lookup.Map: unexpected multiple results from vindex {table}: {id}")]
    MultipleResults {
        /// Backing table
        table: String,
        /// Offending input id
        id: Value,
    },

    /// The vindex is configured to reject updates
    #[error("lookup.Update: update is disallowed on vindex table {table}")]
    UpdateDisallowed {
        /// Backing table
        table: String,
    },

    /// No factory is registered under the requested type name
    #[error("unknown vindex type '{name}', available: [{available}]")]
    UnknownVindexType {
        /// Requested type name
        name: String,
        /// Comma-separated registered type names
        available: String,
    },

    /// Paired argument lists have different lengths
    #[error("{op}: got {left} ids but {right} values")]
    LengthMismatch {
        /// Operation that received the lists
        op: &'static str,
        /// Length of the id list
        left: usize,
        /// Length of the paired list
        right: usize,
    },

    /// A row of "from" values does not match the configured columns
    #[error("{op}: row {row} has {got} values, vindex table {table} has {want} from columns")]
    ColumnCountMismatch {
        /// Operation that received the row
        op: &'static str,
        /// Backing table
        table: String,
        /// Row index
        row: usize,
        /// Number of values in the row
        got: usize,
        /// Number of configured from columns
        want: usize,
    },

    /// A VSchema vindex failed to build
    #[error("keyspace '{keyspace}' vindex '{vindex}': {source}")]
    Build {
        /// Keyspace name
        keyspace: String,
        /// Vindex name
        vindex: String,
        /// Construction error
        #[source]
        source: Box<VindexError>,
    },
}

impl VindexError {
    /// Create an Execution error
    #[inline]
    pub fn execution(op: &'static str, source: QueryError) -> Self {
        Self::Execution { op, source }
    }

    /// Create a Decode error
    #[inline]
    pub fn decode(op: &'static str, source: KsidError) -> Self {
        Self::Decode { op, source }
    }

    /// Create a MultipleResults error
    pub fn multiple_results(table: impl Into<String>, id: Value) -> Self {
        Self::MultipleResults {
            table: table.into(),
            id,
        }
    }

    /// Create an UpdateDisallowed error
    pub fn update_disallowed(table: impl Into<String>) -> Self {
        Self::UpdateDisallowed {
            table: table.into(),
        }
    }

    /// Create an UnknownVindexType error
    pub fn unknown_vindex_type(name: impl Into<String>, available: &[&str]) -> Self {
        Self::UnknownVindexType {
            name: name.into(),
            available: available.join(", "),
        }
    }

    /// Create a Build error
    pub fn build(keyspace: impl Into<String>, vindex: impl Into<String>, source: VindexError) -> Self {
        Self::Build {
            keyspace: keyspace.into(),
            vindex: vindex.into(),
            source: Box::new(source),
        }
    }
}
