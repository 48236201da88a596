//! Recording cursor
//!
//! An in-memory [`VCursor`] that logs every statement it receives and
//! answers selects with a configurable number of identical rows. Used to
//! exercise vindexes without a database, and to assert on the exact
//! statements a vindex issues.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::cursor::VCursor;
use crate::error::QueryError;
use crate::result::{BindVars, QueryResult};
use crate::value::Value;

#[cfg(test)]
#[path = "recording_test.rs"]
mod tests;

/// A statement as received by the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    /// Calling operation (e.g. "VindexCreate")
    pub method: String,
    /// Statement template
    pub sql: String,
    /// Bound values
    pub bind_vars: BindVars,
    /// Whether the statement was flagged as DML
    pub is_dml: bool,
    /// Whether it was sent through `execute_autocommit`
    pub autocommit: bool,
}

/// Cursor that records statements and returns canned rows
#[derive(Debug)]
pub struct RecordingCursor {
    num_rows: usize,
    row: Vec<Value>,
    must_fail: bool,
    queries: Mutex<Vec<BoundQuery>>,
}

impl Default for RecordingCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCursor {
    /// Create a cursor that returns no rows
    pub fn new() -> Self {
        Self {
            num_rows: 0,
            row: vec![Value::Int64(1)],
            must_fail: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Return `num_rows` rows for every non-DML statement
    pub fn with_rows(mut self, num_rows: usize) -> Self {
        self.num_rows = num_rows;
        self
    }

    /// Use `row` as the canned row (default: `[INT64(1)]`)
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.row = row;
        self
    }

    /// Fail every statement with "execute failed"
    pub fn failing(mut self) -> Self {
        self.must_fail = true;
        self
    }

    /// Statements received so far, in order
    pub fn queries(&self) -> Vec<BoundQuery> {
        self.queries.lock().clone()
    }

    /// Number of statements received so far
    pub fn query_count(&self) -> usize {
        self.queries.lock().len()
    }

    /// Forget recorded statements
    pub fn clear(&self) {
        self.queries.lock().clear();
    }

    fn record(
        &self,
        method: &str,
        query: &str,
        bind_vars: &BindVars,
        is_dml: bool,
        autocommit: bool,
    ) -> Result<QueryResult, QueryError> {
        self.queries.lock().push(BoundQuery {
            method: method.to_string(),
            sql: query.to_string(),
            bind_vars: bind_vars.clone(),
            is_dml,
            autocommit,
        });

        if self.must_fail {
            return Err(QueryError::execution("execute failed"));
        }

        // Verify runs flagged as DML yet returns rows: answer by statement text.
        if query.trim_start().to_ascii_lowercase().starts_with("select") {
            let rows = (0..self.num_rows).map(|_| self.row.clone()).collect();
            return Ok(QueryResult::new(rows));
        }

        Ok(QueryResult::affected(1))
    }
}

#[async_trait]
impl VCursor for RecordingCursor {
    async fn execute(
        &self,
        method: &str,
        query: &str,
        bind_vars: &BindVars,
        is_dml: bool,
    ) -> Result<QueryResult, QueryError> {
        self.record(method, query, bind_vars, is_dml, false)
    }

    async fn execute_autocommit(
        &self,
        method: &str,
        query: &str,
        bind_vars: &BindVars,
        is_dml: bool,
    ) -> Result<QueryResult, QueryError> {
        self.record(method, query, bind_vars, is_dml, true)
    }
}
