//! Cryptographic primitives for the Carrot bluff chat
//!
//! This module provides the key material and codecs behind the encrypted
//! side channel between two game participants:
//!
//! - **Key material**: X25519 key-pairs, either freshly generated for a game
//!   or derived deterministically from a wallet signature
//! - **Shard codec**: a bijection between a 32-byte secret key and four
//!   unsigned 64-bit shards, each small enough to be FHE-encrypted and
//!   published on-chain individually
//! - **Chat codec**: NaCl box (X25519 + XSalsa20-Poly1305) encryption of
//!   chat messages into a single base64 transport token
//!
//! # Key exchange model
//!
//! The game creator generates an ephemeral key-pair, splits its secret key
//! into four shards, and publishes each shard FHE-encrypted alongside the
//! public key. The counterparty recovers the secret by having the FHE
//! coprocessor unseal the shards and rejoining them. From that point both
//! participants hold the *same* pair, so chat messages are sealed and opened
//! with the two halves of one shared pair: confidential against third
//! parties, but not authenticating which of the two participants sent a
//! given message.

mod chat;
mod keys;
mod shards;

pub use chat::{decrypt_message, encrypt_message, ChatError, NONCE_SIZE};
pub use keys::{KeyError, KeyPair, PublicKey, SecretKey, PUBLIC_KEY_SIZE, SECRET_KEY_SIZE};
pub use shards::{join_key, split_key, ShardError, KEY_SIZE, SHARD_COUNT, SHARD_SIZE};
