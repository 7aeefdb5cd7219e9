use serde::{Deserialize, Serialize};

use super::wallet::Address;

/// FHE plaintext types the protocol encrypts
///
/// The shard exchange uses `Uint64` exclusively; `Bool` carries the
/// creator's hidden game choice through the same oracle surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FheType {
    Bool,
    Uint64,
}

/// A plaintext value paired with its FHE type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FheValue {
    Bool(bool),
    Uint64(u64),
}

impl FheValue {
    pub fn fhe_type(&self) -> FheType {
        match self {
            FheValue::Bool(_) => FheType::Bool,
            FheValue::Uint64(_) => FheType::Uint64,
        }
    }
}

/// An opaque handle to a ciphertext held by the oracle
///
/// Semantically a commitment to one encrypted value, decryptable only by
/// accounts the oracle's permit system authorizes. The contract stores these
/// as uint256 hashes; here they stay as the decimal/hex string the SDK
/// returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CiphertextHandle(pub String);

impl CiphertextHandle {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An authorization credential binding a signer address to oracle access
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permit {
    /// Opaque permit identifier used for removal
    pub hash: String,
    /// The address that issued (and is authorized by) this permit
    pub issuer: Address,
}

/// Errors reported across the oracle boundary
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The oracle rejected an encrypt request
    #[error("oracle encryption failed: {0}")]
    EncryptionFailed(String),
    /// The requesting account is not (yet) authorized for a handle
    ///
    /// Transient: permit propagation inside the oracle can lag behind
    /// permit creation, so callers retry this class with a bounded policy.
    #[error("unseal forbidden for account {account}: {reason}")]
    UnsealForbidden { account: Address, reason: String },
    /// The oracle rejected an unseal request for a non-authorization reason
    #[error("oracle unseal failed: {0}")]
    UnsealFailed(String),
    /// The oracle rejected a fresh permit request
    #[error("permit reauthorization failed: {0}")]
    ReauthorizationFailed(String),
    /// Session establishment failed; the next call re-attempts
    #[error("oracle initialization failed: {0}")]
    Initialization(#[from] anyhow::Error),
}

impl OracleError {
    /// Whether this error is the known-transient authorization class
    pub fn is_transient(&self) -> bool {
        matches!(self, OracleError::UnsealForbidden { .. })
    }
}

/// The narrow capability interface to the FHE oracle SDK
///
/// Exactly the operations the protocol needs, with typed results, so the
/// session and exchange code never touch the concrete SDK's shape. Every
/// method may suspend for a network round trip.
#[async_trait::async_trait]
pub trait OracleBackend: Send + Sync {
    /// Establish the oracle session for the given signer
    async fn initialize(&self, signer: &Address) -> Result<(), OracleError>;

    /// Encrypt a plaintext value, returning its ciphertext handle
    async fn encrypt(&self, value: FheValue) -> Result<CiphertextHandle, OracleError>;

    /// Reveal the plaintext behind a handle to an authorized account
    async fn unseal(
        &self,
        handle: &CiphertextHandle,
        utype: FheType,
        account: &Address,
    ) -> Result<FheValue, OracleError>;

    /// The currently active permit, if any
    async fn active_permit(&self) -> Result<Option<Permit>, OracleError>;

    /// Remove a permit by its hash
    async fn remove_permit(&self, hash: &str) -> Result<(), OracleError>;

    /// Request a fresh permit for the current session
    async fn create_permit(&self) -> Result<Permit, OracleError>;
}
