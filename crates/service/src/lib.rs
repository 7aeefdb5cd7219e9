//! FHE oracle session and shard exchange protocol for Carrot.
//!
//! This crate provides the asynchronous half of the bluff-chat key exchange:
//! - Oracle session management (lazy single-flight initialization, permit lifecycle)
//! - The narrow typed capability interface to the FHE coprocessor SDK
//! - A bounded-retry combinator for transient authorization errors
//! - The shard exchange protocol itself (creator and reconstructor paths)
//! - A broadcast log bus that surfaces protocol progress to UI observers

pub mod config;
pub mod exchange;
pub mod logs;
pub mod oracle;
pub mod retry;

// Re-export key types for convenience
pub use config::Config;
pub use exchange::{publish_game_key, recover_game_key, ExchangeError, ShardPublication};
pub use logs::LogBus;
pub use oracle::{
    Address, CiphertextHandle, FheType, FheValue, OracleBackend, OracleError, OracleSession,
    Permit, WalletProvider,
};
pub use retry::RetryPolicy;
