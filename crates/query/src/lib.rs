//! Shardgate Query - statement execution contract for vindexes
//!
//! Vindexes never talk to a database directly. They build statement
//! templates with `:name` placeholders, bind [`Value`]s, and hand both to a
//! [`VCursor`] supplied by the host process. Results come back as rows that
//! are read by column position only.
//!
//! # Usage
//!
//! ```ignore
//! use shardgate_query::{BindVars, RecordingCursor, VCursor, Value};
//!
//! let vc = RecordingCursor::new().with_rows(1);
//! let mut vars = BindVars::new();
//! vars.insert("id".into(), Value::Int64(7));
//!
//! let result = vc
//!     .execute("VindexLookup", "select ksid from lkp where id = :id", &vars, false)
//!     .await?;
//! assert_eq!(result.row_count(), 1);
//! assert_eq!(vc.query_count(), 1);
//! ```

pub mod cursor;
pub mod error;
pub mod recording;
pub mod result;
pub mod value;

// Re-exports
pub use cursor::VCursor;
pub use error::QueryError;
pub use recording::{BoundQuery, RecordingCursor};
pub use result::{BindVars, QueryResult};
pub use value::Value;

/// Result type for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
