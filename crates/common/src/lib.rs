/**
 * Cryptographic types and operations.
 *  - Game key-pair generation and signature derivation
 *  - Secret-key shard codec for FHE publication
 *  - Authenticated chat token encryption/decryption
 */
pub mod crypto;

pub mod prelude {
    pub use crate::crypto::{
        decrypt_message, encrypt_message, join_key, split_key, KeyPair, PublicKey, SecretKey,
    };
}
