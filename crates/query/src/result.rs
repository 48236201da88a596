//! Query result and bind variable types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Named bind variables for a statement template
///
/// Ordered so statement logs and test assertions are deterministic.
pub type BindVars = BTreeMap<String, Value>;

/// Rows returned by a statement
///
/// Only positional access is assumed: callers index rows by column position
/// and never by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Row data, each row an ordered list of values
    pub rows: Vec<Vec<Value>>,

    /// Rows affected by a DML statement
    pub rows_affected: u64,
}

impl QueryResult {
    /// Create a result from rows
    pub fn new(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows,
            rows_affected: 0,
        }
    }

    /// Create an empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a DML result with an affected-row count
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows: Vec::new(),
            rows_affected,
        }
    }

    /// Check if result has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First column of every row, skipping empty rows
    pub fn first_column(&self) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(|row| row.first())
    }
}
