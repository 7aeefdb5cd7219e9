//! Shard exchange protocol
//!
//! The asynchronous key exchange between the game creator and whoever joins
//! later, carried entirely through the FHE oracle and the contract:
//!
//! - **Creator**: generate an ephemeral game pair, split its secret key into
//!   four shards, FHE-encrypt each shard, and hand the public key plus the
//!   four ciphertext handles to the contract-creation call.
//! - **Reconstructor**: read the published handles, have the oracle unseal
//!   all four, rejoin the secret key, and pair it with the published public
//!   key.
//!
//! The creator encrypts shards one at a time in index order so the UI can
//! attribute progress to a specific shard; the reconstructor unseals in
//! parallel because the four reads are independent and only their indexed
//! results matter.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};

use common::crypto::{join_key, split_key, KeyPair, PublicKey, SecretKey, ShardError, SHARD_COUNT};

use crate::oracle::{
    Address, CiphertextHandle, OracleBackend, OracleError, OracleSession, WalletProvider,
};
use crate::retry::{retry_transient, RetryPolicy};

/// Errors from the shard exchange protocol
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error(transparent)]
    Shard(#[from] ShardError),
}

/// The key material a game creation call publishes on-chain
///
/// The contract bundles the public key and all four handles into one
/// atomic creation transaction, so there is no partially-published state
/// for this protocol to clean up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardPublication {
    /// Public half of the ephemeral game pair, stored as contract hex
    pub public_key: PublicKey,
    /// FHE ciphertext handles for the four secret-key shards, in index order
    pub handles: [CiphertextHandle; SHARD_COUNT],
}

/// Creator path: generate the game pair and encrypt its secret-key shards
///
/// Shards are encrypted sequentially in index order; the first failure
/// aborts the whole flow, leaving nothing published. Returns the pair
/// (which stays in the creator's memory) and the publication payload for
/// the contract call.
pub async fn publish_game_key<B, W>(
    session: &OracleSession<B, W>,
) -> Result<(KeyPair, ShardPublication), ExchangeError>
where
    B: OracleBackend,
    W: WalletProvider,
{
    let keys = KeyPair::generate();
    let shards = split_key(&keys.secret().to_bytes())?;

    let mut handles = Vec::with_capacity(SHARD_COUNT);
    for (i, shard) in shards.iter().enumerate() {
        session
            .logs()
            .publish(format!("Encrypting key shard {}/{}...", i + 1, SHARD_COUNT));
        handles.push(session.encrypt_u64(*shard).await?);
    }
    let handles: [CiphertextHandle; SHARD_COUNT] = handles
        .try_into()
        .expect("encrypted exactly SHARD_COUNT shards");

    session.logs().publish("All key shards encrypted");

    let publication = ShardPublication {
        public_key: keys.public().clone(),
        handles,
    };
    Ok((keys, publication))
}

/// Reconstructor path: unseal the published shards and rebuild the pair
///
/// All four handles are unsealed in parallel. If any unseal fails with the
/// transient authorization class, the entire batch is retried under
/// `policy`; any other error is surfaced immediately. Shard order is
/// preserved positionally through the parallel join.
pub async fn recover_game_key<B, W>(
    session: &OracleSession<B, W>,
    publication: &ShardPublication,
    account: &Address,
    policy: RetryPolicy,
) -> Result<KeyPair, ExchangeError>
where
    B: OracleBackend,
    W: WalletProvider,
{
    let mut attempt = 0u32;
    let shards = retry_transient(policy, OracleError::is_transient, || {
        attempt += 1;
        session
            .logs()
            .publish(format!("Unsealing shared game key (attempt {attempt})..."));
        try_join_all(
            publication
                .handles
                .iter()
                .map(|handle| session.unseal_u64(handle, account)),
        )
    })
    .await?;

    let secret_bytes = join_key(&shards)?;
    let keys = KeyPair::from_parts(
        publication.public_key.clone(),
        SecretKey::from(secret_bytes),
    );

    session.logs().publish("Shared game key recovered");
    Ok(keys)
}
