use std::fmt;

use serde::{Deserialize, Serialize};

/// A wallet account address, normalized to lowercase hex
///
/// Addresses arrive from the wallet and from permit issuers with mixed
/// casing; normalizing at construction makes equality checks (notably the
/// permit-issuer match during initialization) plain `==`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(addr: impl AsRef<str>) -> Self {
        Self(addr.as_ref().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(addr: &str) -> Self {
        Self::new(addr)
    }
}

/// The browser-wallet seam
///
/// The session needs exactly two things from the wallet: a best-effort
/// switch to the target chain and the active signer's address. Connection
/// management, account selection, and transaction signing live with the
/// embedding application.
#[async_trait::async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet to switch to the given chain
    ///
    /// Rejection is tolerated by the caller; it is logged, not fatal.
    async fn switch_chain(&self, chain_id: u64) -> anyhow::Result<()>;

    /// The address of the currently active signer
    async fn signer_address(&self) -> anyhow::Result<Address>;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_address_normalizes_case() {
        let a = Address::new("0xAbCd1234");
        let b = Address::new("0xabcd1234");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcd1234");
    }
}
