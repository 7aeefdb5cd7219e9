use tokio::sync::Mutex;

use crate::config::Config;
use crate::logs::LogBus;

use super::backend::{CiphertextHandle, FheType, FheValue, OracleBackend, OracleError, Permit};
use super::wallet::{Address, WalletProvider};

/// Cached state of an established oracle session
#[derive(Debug, Clone)]
struct Ready {
    account: Address,
    permit: Permit,
}

/// A lazily-initialized, process-wide session with the FHE oracle
///
/// The session is established on first use and cached for the life of the
/// process. Initialization is single-flight: callers serialize on an
/// internal lock, so a second caller arriving mid-initialization awaits the
/// in-flight attempt instead of starting another one (which would churn
/// permits). A failed attempt is not cached; the next call re-attempts
/// cleanly.
///
/// Encrypt and unseal calls only touch the lock long enough to confirm the
/// session is ready, so independent oracle round trips still run
/// concurrently.
pub struct OracleSession<B, W> {
    backend: B,
    wallet: W,
    config: Config,
    logs: LogBus,
    ready: Mutex<Option<Ready>>,
}

impl<B, W> OracleSession<B, W>
where
    B: OracleBackend,
    W: WalletProvider,
{
    pub fn new(backend: B, wallet: W, config: Config, logs: LogBus) -> Self {
        Self {
            backend,
            wallet,
            config,
            logs,
            ready: Mutex::new(None),
        }
    }

    pub fn logs(&self) -> &LogBus {
        &self.logs
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Initialize the session if needed and return the active account
    pub async fn ensure_ready(&self) -> Result<Address, OracleError> {
        let mut slot = self.ready.lock().await;
        let ready = self.ready_slot(&mut slot).await?;
        Ok(ready.account.clone())
    }

    /// The permit of the established session, if one exists yet
    pub async fn permit(&self) -> Option<Permit> {
        let slot = self.ready.lock().await;
        slot.as_ref().map(|ready| ready.permit.clone())
    }

    /// Encrypt a 64-bit value, returning its ciphertext handle
    pub async fn encrypt_u64(&self, value: u64) -> Result<CiphertextHandle, OracleError> {
        self.ensure_ready().await?;
        self.backend.encrypt(FheValue::Uint64(value)).await
    }

    /// Encrypt a boolean value, returning its ciphertext handle
    pub async fn encrypt_bool(&self, value: bool) -> Result<CiphertextHandle, OracleError> {
        self.ensure_ready().await?;
        self.backend.encrypt(FheValue::Bool(value)).await
    }

    /// Unseal a 64-bit plaintext for an authorized account
    pub async fn unseal_u64(
        &self,
        handle: &CiphertextHandle,
        account: &Address,
    ) -> Result<u64, OracleError> {
        self.ensure_ready().await?;
        tracing::debug!(handle = handle.as_str(), "unsealing u64 handle");
        match self.backend.unseal(handle, FheType::Uint64, account).await? {
            FheValue::Uint64(value) => Ok(value),
            other => Err(OracleError::UnsealFailed(format!(
                "expected a u64 plaintext, got {other:?}"
            ))),
        }
    }

    /// Unseal a boolean plaintext for an authorized account
    pub async fn unseal_bool(
        &self,
        handle: &CiphertextHandle,
        account: &Address,
    ) -> Result<bool, OracleError> {
        self.ensure_ready().await?;
        tracing::debug!(handle = handle.as_str(), "unsealing bool handle");
        match self.backend.unseal(handle, FheType::Bool, account).await? {
            FheValue::Bool(value) => Ok(value),
            other => Err(OracleError::UnsealFailed(format!(
                "expected a bool plaintext, got {other:?}"
            ))),
        }
    }

    /// Drop every existing permit and request a fresh one
    ///
    /// The new permit replaces the cached one last-write-wins; an encrypt or
    /// unseal already in flight keeps whatever authorization it started
    /// with. Concurrent reauthorize calls serialize on the session lock.
    pub async fn reauthorize(&self) -> Result<Permit, OracleError> {
        let mut slot = self.ready.lock().await;
        let ready = self.ready_slot(&mut slot).await?;

        self.logs.publish("Requesting fresh oracle permit...");
        while let Some(permit) = self.backend.active_permit().await? {
            tracing::debug!(permit = %permit.hash, "removing old permit");
            self.backend.remove_permit(&permit.hash).await?;
        }

        let permit = self.backend.create_permit().await?;
        ready.permit = permit.clone();
        self.logs.publish("Fresh oracle permit obtained");
        Ok(permit)
    }

    /// Get the cached session or establish it, under the caller's lock
    async fn ready_slot<'a>(
        &self,
        slot: &'a mut Option<Ready>,
    ) -> Result<&'a mut Ready, OracleError> {
        if slot.is_none() {
            let ready = self.establish().await?;
            return Ok(slot.insert(ready));
        }
        Ok(slot.as_mut().expect("session slot is populated"))
    }

    /// Bind the wallet, establish the oracle session, and sort out the permit
    async fn establish(&self) -> Result<Ready, OracleError> {
        self.logs.publish("Initializing oracle session...");

        // a refused chain switch is survivable; the wallet may already be
        // on the right chain or the user may switch manually
        if let Err(e) = self.wallet.switch_chain(self.config.chain_id).await {
            tracing::warn!("chain switch failed or was rejected: {e:#}");
        }

        let account = self
            .wallet
            .signer_address()
            .await
            .map_err(OracleError::Initialization)?;

        self.backend.initialize(&account).await?;

        let permit = match self.backend.active_permit().await? {
            Some(permit) if permit.issuer != account => {
                tracing::warn!(
                    permit = %permit.hash,
                    issuer = %permit.issuer,
                    signer = %account,
                    "permit issuer mismatch, clearing stale permit"
                );
                self.backend.remove_permit(&permit.hash).await?;
                self.backend.create_permit().await?
            }
            Some(permit) => permit,
            None => self.backend.create_permit().await?,
        };

        self.logs
            .publish(format!("Oracle session ready for {account}"));
        Ok(Ready { account, permit })
    }
}
