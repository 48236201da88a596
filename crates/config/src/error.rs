//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
///
/// Every variant is raised while a vindex or VSchema is being built, never
/// while a vindex is serving calls.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    IoError {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A required vindex parameter is absent
    #[error("missing required param '{param}'")]
    MissingParam {
        /// Name of the missing parameter
        param: String,
    },

    /// A boolean parameter holds something other than a boolean literal
    #[error("{key} value must be 'true' or 'false': '{value}'")]
    InvalidBool {
        /// Parameter name
        key: String,
        /// Offending value, verbatim
        value: String,
    },

    /// A parameter is present but unusable
    #[error("invalid param '{param}': {message}")]
    InvalidParam {
        /// Parameter name
        param: String,
        /// Error message
        message: String,
    },

    /// A flag that only non-unique vindexes accept was set on a unique one
    #[error("{flag} cannot be true for a unique lookup vindex")]
    UniqueConflict {
        /// Flag name
        flag: &'static str,
    },

    /// VSchema declares a vindex of a type nobody registered
    #[error("vindex '{vindex}' has unknown type '{vindex_type}'")]
    UnknownVindexType {
        /// Vindex name
        vindex: String,
        /// Declared type
        vindex_type: String,
    },

    /// VSchema declares vindexes on an unsharded keyspace
    #[error("keyspace '{keyspace}' is unsharded but declares vindex '{vindex}'")]
    VindexInUnshardedKeyspace {
        /// Keyspace name
        keyspace: String,
        /// Vindex name
        vindex: String,
    },
}

impl ConfigError {
    /// Create a MissingParam error
    pub fn missing_param(param: impl Into<String>) -> Self {
        Self::MissingParam {
            param: param.into(),
        }
    }

    /// Create an InvalidBool error
    pub fn invalid_bool(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidBool {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create an InvalidParam error
    pub fn invalid_param(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParam {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a UniqueConflict error
    pub fn unique_conflict(flag: &'static str) -> Self {
        Self::UniqueConflict { flag }
    }

    /// Create an UnknownVindexType error
    pub fn unknown_vindex_type(vindex: impl Into<String>, vindex_type: impl Into<String>) -> Self {
        Self::UnknownVindexType {
            vindex: vindex.into(),
            vindex_type: vindex_type.into(),
        }
    }

    /// Create a VindexInUnshardedKeyspace error
    pub fn vindex_in_unsharded_keyspace(
        keyspace: impl Into<String>,
        vindex: impl Into<String>,
    ) -> Self {
        Self::VindexInUnshardedKeyspace {
            keyspace: keyspace.into(),
            vindex: vindex.into(),
        }
    }
}
