//! Keyspace id hashing
//!
//! Legacy hash vindexes store a plain `u64` in the lookup table and derive
//! the keyspace id from it. The derivation is one Triple-DES block
//! encryption of the big-endian integer under an all-zero key: a fixed
//! permutation of 64-bit values, so sequential ids land far apart while
//! every keyspace id still decodes back to exactly one integer.

use std::sync::LazyLock;

use des::TdesEde3;
use des::cipher::consts::U8;
use des::cipher::generic_array::GenericArray;
use des::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use shardgate_routing::KeyspaceId;
use thiserror::Error;

#[cfg(test)]
#[path = "hash_test.rs"]
mod tests;

/// Width of a hashed keyspace id
pub const HASHED_KSID_LEN: usize = 8;

static BLOCK_3DES: LazyLock<TdesEde3> = LazyLock::new(|| TdesEde3::new(&GenericArray::default()));

/// Errors from decoding a keyspace id
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KsidError {
    /// Input is not an 8-byte hashed keyspace id
    #[error("invalid keyspace id: {}", hex::encode(.0))]
    MalformedKeyspaceId(Vec<u8>),
}

/// Hash an integer into its keyspace id
pub fn vhash(n: u64) -> KeyspaceId {
    let mut block = GenericArray::<u8, U8>::from(n.to_be_bytes());
    BLOCK_3DES.encrypt_block(&mut block);
    KeyspaceId::new(block.to_vec())
}

/// Recover the integer a keyspace id was hashed from
///
/// # Errors
/// Returns `KsidError::MalformedKeyspaceId` unless `ksid` is exactly 8 bytes.
pub fn vunhash(ksid: &[u8]) -> Result<u64, KsidError> {
    let bytes: [u8; HASHED_KSID_LEN] = ksid
        .try_into()
        .map_err(|_| KsidError::MalformedKeyspaceId(ksid.to_vec()))?;
    let mut block = GenericArray::<u8, U8>::from(bytes);
    BLOCK_3DES.decrypt_block(&mut block);

    let mut out = [0u8; HASHED_KSID_LEN];
    out.copy_from_slice(&block);
    Ok(u64::from_be_bytes(out))
}
