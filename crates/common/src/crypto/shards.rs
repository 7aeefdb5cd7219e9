//! Secret-key shard codec
//!
//! A 32-byte secret key is too large to FHE-encrypt as a single value, so it
//! is carried on-chain as four independent `euint64` ciphertexts. This module
//! implements the deterministic bijection between the key bytes and those
//! four shards.
//!
//! Shard `i` covers key bytes `[8 * i, 8 * i + 8)`, read and written
//! little-endian. Order is significant end-to-end: the contract stores the
//! shards positionally and [`join_key`] writes each value back at the offset
//! its index implies.

/// Size of a secret key in bytes
pub const KEY_SIZE: usize = 32;
/// Number of shards a key splits into
pub const SHARD_COUNT: usize = 4;
/// Size of a single shard in bytes (one u64)
pub const SHARD_SIZE: usize = 8;

/// Errors that can occur encoding or decoding shards
///
/// Both variants indicate caller misuse, not recoverable conditions.
#[derive(Debug, thiserror::Error)]
pub enum ShardError {
    #[error("invalid key length, expected {KEY_SIZE} bytes, got {0}")]
    InvalidLength(usize),
    #[error("invalid shard count, expected {SHARD_COUNT}, got {0}")]
    InvalidShardCount(usize),
}

/// Split a 32-byte secret key into 4 little-endian u64 shards
///
/// # Errors
///
/// Returns [`ShardError::InvalidLength`] if the input is not exactly
/// `KEY_SIZE` bytes.
pub fn split_key(key: &[u8]) -> Result<[u64; SHARD_COUNT], ShardError> {
    if key.len() != KEY_SIZE {
        return Err(ShardError::InvalidLength(key.len()));
    }
    let mut shards = [0u64; SHARD_COUNT];
    for (i, shard) in shards.iter_mut().enumerate() {
        let mut buff = [0u8; SHARD_SIZE];
        buff.copy_from_slice(&key[i * SHARD_SIZE..(i + 1) * SHARD_SIZE]);
        *shard = u64::from_le_bytes(buff);
    }
    Ok(shards)
}

/// Reassemble a 32-byte secret key from 4 little-endian u64 shards
///
/// The inverse of [`split_key`]: `join_key(&split_key(k)?)? == k` for every
/// 32-byte `k`.
///
/// # Errors
///
/// Returns [`ShardError::InvalidShardCount`] if the input does not contain
/// exactly `SHARD_COUNT` values.
pub fn join_key(shards: &[u64]) -> Result<[u8; KEY_SIZE], ShardError> {
    if shards.len() != SHARD_COUNT {
        return Err(ShardError::InvalidShardCount(shards.len()));
    }
    let mut key = [0u8; KEY_SIZE];
    for (i, shard) in shards.iter().enumerate() {
        key[i * SHARD_SIZE..(i + 1) * SHARD_SIZE].copy_from_slice(&shard.to_le_bytes());
    }
    Ok(key)
}
