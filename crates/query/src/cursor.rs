//! Query cursor trait
//!
//! The cursor is how a vindex reaches its backing lookup table. The host
//! process supplies the implementation; it owns connections, transactions,
//! deadlines and retries. Vindexes only build statements, bind values and
//! read rows positionally.

use async_trait::async_trait;

use crate::error::QueryError;
use crate::result::{BindVars, QueryResult};

/// Executes statements on behalf of a vindex
///
/// Implementations must be shareable across tasks: many vindex calls may
/// use the same cursor concurrently.
#[async_trait]
pub trait VCursor: Send + Sync {
    /// Execute a statement inside the caller's ambient transaction
    ///
    /// # Arguments
    /// * `method` - Calling operation, for logging and statistics (e.g. "VindexLookup")
    /// * `query` - Statement template with `:name` placeholders
    /// * `bind_vars` - Values for the placeholders
    /// * `is_dml` - Whether the statement writes
    async fn execute(
        &self,
        method: &str,
        query: &str,
        bind_vars: &BindVars,
        is_dml: bool,
    ) -> Result<QueryResult, QueryError>;

    /// Execute a statement in its own transaction, committed immediately
    ///
    /// Defaults to [`VCursor::execute`] for cursors with no transaction
    /// of their own.
    async fn execute_autocommit(
        &self,
        method: &str,
        query: &str,
        bind_vars: &BindVars,
        is_dml: bool,
    ) -> Result<QueryResult, QueryError> {
        self.execute(method, query, bind_vars, is_dml).await
    }
}
