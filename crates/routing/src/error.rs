//! Routing error types

use thiserror::Error;

/// Result type for routing operations
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors that can occur when parsing routing keys
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Keyspace id text is not valid hex
    #[error("invalid keyspace id '{input}': {reason}")]
    InvalidKeyspaceId {
        /// Text that failed to parse
        input: String,
        /// Why it failed
        reason: String,
    },

    /// Key range bounds are malformed or out of order
    #[error("invalid key range '{input}': {reason}")]
    InvalidKeyRange {
        /// Text or bounds that failed to parse
        input: String,
        /// Why it failed
        reason: String,
    },
}

impl RoutingError {
    /// Create an InvalidKeyspaceId error
    #[inline]
    pub fn invalid_keyspace_id(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKeyspaceId {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidKeyRange error
    #[inline]
    pub fn invalid_key_range(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKeyRange {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
