//! Typed SQL values
//!
//! `Value` is what flows between vindexes and the backing store: input ids,
//! bind variables and result cells. It renders as `TYPE(value)` so error
//! messages identify both the type and the content of an offending id.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;

/// A single SQL value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// SQL NULL
    Null,
    /// Signed 64-bit integer
    Int64(i64),
    /// Unsigned 64-bit integer
    Uint64(u64),
    /// 64-bit floating point
    Float64(f64),
    /// UTF-8 text
    VarChar(String),
    /// Raw bytes
    VarBinary(Vec<u8>),
}

impl Value {
    /// Type name as rendered in messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL_TYPE",
            Self::Int64(_) => "INT64",
            Self::Uint64(_) => "UINT64",
            Self::Float64(_) => "FLOAT64",
            Self::VarChar(_) => "VARCHAR",
            Self::VarBinary(_) => "VARBINARY",
        }
    }

    /// Check for SQL NULL
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Raw byte representation
    ///
    /// Numbers render as their decimal text, strings and binaries as-is.
    /// NULL is empty.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Null => Vec::new(),
            Self::Int64(n) => n.to_string().into_bytes(),
            Self::Uint64(n) => n.to_string().into_bytes(),
            Self::Float64(n) => n.to_string().into_bytes(),
            Self::VarChar(s) => s.clone().into_bytes(),
            Self::VarBinary(b) => b.clone(),
        }
    }

    /// Convert to an unsigned 64-bit integer
    ///
    /// Integral values convert directly (negative values are rejected).
    /// Text and binary values are parsed as decimal integers.
    pub fn to_u64(&self) -> Result<u64, QueryError> {
        match self {
            Self::Uint64(n) => Ok(*n),
            Self::Int64(n) => u64::try_from(*n)
                .map_err(|_| QueryError::conversion(self.to_string(), "negative number")),
            Self::VarChar(_) | Self::VarBinary(_) => self.parse_textual(),
            Self::Float64(_) | Self::Null => Err(QueryError::conversion(
                self.to_string(),
                "not an integral value",
            )),
        }
    }

    fn parse_textual(&self) -> Result<u64, QueryError> {
        let bytes = self.to_bytes();
        let text = std::str::from_utf8(&bytes)
            .map_err(|_| QueryError::conversion(self.to_string(), "invalid utf-8"))?;
        let text = text.trim();
        if let Ok(signed) = text.parse::<i64>() {
            return u64::try_from(signed)
                .map_err(|_| QueryError::conversion(self.to_string(), "negative number"));
        }
        text.parse::<u64>()
            .map_err(|e| QueryError::conversion(self.to_string(), e.to_string()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Int64(n) => write!(f, "INT64({n})"),
            Self::Uint64(n) => write!(f, "UINT64({n})"),
            Self::Float64(n) => write!(f, "FLOAT64({n})"),
            Self::VarChar(s) => write!(f, "VARCHAR({s:?})"),
            Self::VarBinary(b) => write!(f, "VARBINARY({:?})", String::from_utf8_lossy(b)),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int64(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Uint64(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::VarChar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::VarChar(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::VarBinary(b)
    }
}
