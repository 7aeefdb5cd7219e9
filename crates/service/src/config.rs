use crate::retry::RetryPolicy;

/// Chain id the oracle session asks the wallet to switch to (Sepolia)
pub const DEFAULT_CHAIN_ID: u64 = 11155111;

/// Service configuration for the oracle session
///
/// Plain data passed to [`OracleSession::new`](crate::OracleSession::new);
/// there is no file or environment layer here because the embedding
/// application owns that concern.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chain id requested from the wallet during initialization
    pub chain_id: u64,
    /// Retry policy applied to the reconstructor's unseal batch
    pub unseal_retry: RetryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            unseal_retry: RetryPolicy::default(),
        }
    }
}
