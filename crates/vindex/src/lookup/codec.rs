//! Keyspace id codecs
//!
//! A lookup vindex stores something in its "to" column and routes by a
//! keyspace id. The codec translates between the two. [`Hashed`] stores an
//! unsigned integer and routes by its [`vhash`]; [`Direct`] stores the
//! keyspace id bytes themselves.

use std::fmt;

use shardgate_query::{QueryError, Value};
use shardgate_routing::KeyspaceId;

use crate::error::{Result, VindexError};
use crate::hash::{KsidError, vhash, vunhash};

/// Translation between a stored "to" value and a keyspace id
pub trait KsidCodec: Send + Sync + fmt::Debug + 'static {
    /// Keyspace id for a value read from the lookup table
    fn ksid_from_value(value: &Value) -> std::result::Result<KeyspaceId, QueryError>;

    /// Value to bind into the lookup table for a keyspace id
    fn value_from_ksid(ksid: &KeyspaceId) -> std::result::Result<Value, KsidError>;
}

/// "to" column holds a 64-bit unsigned integer hashed with [`vhash`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Hashed;

impl KsidCodec for Hashed {
    fn ksid_from_value(value: &Value) -> std::result::Result<KeyspaceId, QueryError> {
        value.to_u64().map(vhash)
    }

    fn value_from_ksid(ksid: &KeyspaceId) -> std::result::Result<Value, KsidError> {
        vunhash(ksid.as_bytes()).map(Value::Uint64)
    }
}

/// "to" column holds the keyspace id bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct;

impl KsidCodec for Direct {
    fn ksid_from_value(value: &Value) -> std::result::Result<KeyspaceId, QueryError> {
        if value.is_null() {
            return Err(QueryError::conversion(value.to_string(), "NULL is not a keyspace id"));
        }
        Ok(KeyspaceId::new(value.to_bytes()))
    }

    fn value_from_ksid(ksid: &KeyspaceId) -> std::result::Result<Value, KsidError> {
        Ok(Value::VarBinary(ksid.as_bytes().to_vec()))
    }
}

/// Encode one keyspace id for binding, tagging failures with `op`
pub(crate) fn value_for<C: KsidCodec>(ksid: &KeyspaceId, op: &'static str) -> Result<Value> {
    C::value_from_ksid(ksid).map_err(|e| VindexError::decode(op, e))
}

/// Encode a list of keyspace ids for binding; the first failure aborts
pub(crate) fn values_for<C: KsidCodec>(ksids: &[KeyspaceId], op: &'static str) -> Result<Vec<Value>> {
    ksids.iter().map(|ksid| value_for::<C>(ksid, op)).collect()
}
