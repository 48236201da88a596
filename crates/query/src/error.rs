//! Query error types

/// Errors surfaced by a query cursor or by value conversion
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The backing store rejected or failed the statement
    #[error("{0}")]
    Execution(String),

    /// Connection to the backing store failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// A value could not be converted to the requested type
    #[error("could not convert {value}: {reason}")]
    Conversion {
        /// Rendered value (e.g. `VARCHAR("abc")`)
        value: String,
        /// Why the conversion failed
        reason: String,
    },
}

impl QueryError {
    /// Create an execution error
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Create a conversion error
    pub fn conversion(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conversion {
            value: value.into(),
            reason: reason.into(),
        }
    }
}
