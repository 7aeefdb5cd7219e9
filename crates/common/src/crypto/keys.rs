use std::fmt;

use crypto_box::{PublicKey as BoxPublicKey, SecretKey as BoxSecretKey};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// Size of an X25519 public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;
/// Size of an X25519 secret key in bytes
pub const SECRET_KEY_SIZE: usize = 32;

/// Errors that can occur during key operations
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key error: {0}")]
    Default(#[from] anyhow::Error),
}

/// Public half of a game key-pair
///
/// A thin wrapper around the NaCl box public key. The game creator publishes
/// this value on-chain (hex-encoded) alongside the FHE-encrypted shards of
/// the matching secret key; both participants later use it to seal and open
/// chat tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey(BoxPublicKey);

impl From<[u8; PUBLIC_KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        PublicKey(BoxPublicKey::from(bytes))
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(anyhow::anyhow!(
                "invalid public key size, expected {}, got {}",
                PUBLIC_KEY_SIZE,
                bytes.len()
            )
            .into());
        }
        let mut buff = [0; PUBLIC_KEY_SIZE];
        buff.copy_from_slice(bytes);
        Ok(buff.into())
    }
}

impl PublicKey {
    /// Parse a public key from a hexadecimal string
    ///
    /// Accepts both plain hex and "0x"-prefixed hex strings, matching the
    /// format the contract stores.
    pub fn from_hex(hex: &str) -> Result<Self, KeyError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut buff = [0; PUBLIC_KEY_SIZE];
        hex::decode_to_slice(hex, &mut buff)
            .map_err(|_| anyhow::anyhow!("public key hex decode error"))?;
        Ok(buff.into())
    }

    /// Convert public key to raw bytes
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        *self.0.as_bytes()
    }

    /// Convert public key to a "0x"-prefixed hexadecimal string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    pub(crate) fn as_box_key(&self) -> &BoxPublicKey {
        &self.0
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        PublicKey::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// Secret half of a game key-pair
///
/// Lives only in the memory of whichever participant generated or
/// reconstructed it. Never serialized, never transmitted in the clear; the
/// only representation that leaves the process is the FHE-encrypted shard
/// form produced by [`split_key`](super::split_key).
#[derive(Clone)]
pub struct SecretKey(BoxSecretKey);

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl From<[u8; SECRET_KEY_SIZE]> for SecretKey {
    fn from(bytes: [u8; SECRET_KEY_SIZE]) -> Self {
        SecretKey(BoxSecretKey::from(bytes))
    }
}

impl SecretKey {
    /// Generate a new random secret key using a cryptographically secure RNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; SECRET_KEY_SIZE];
        getrandom::getrandom(&mut bytes).expect("failed to generate random bytes");
        Self::from(bytes)
    }

    /// Derive the public key from this secret key
    pub fn public(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }

    /// Convert secret key to raw bytes
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.0.to_bytes()
    }

    pub(crate) fn as_box_key(&self) -> &BoxSecretKey {
        &self.0
    }
}

/// An X25519 key-pair for the encrypted bluff chat
///
/// Obtained one of three ways:
/// - [`KeyPair::generate`]: fresh ephemeral pair, used once per game by the
///   creator
/// - [`KeyPair::from_signature`]: deterministic derivation from a wallet
///   signature, for flows where a participant must re-derive a pair without
///   persisted state
/// - [`KeyPair::from_parts`]: reassembly on the reconstructing side from the
///   published public key and the secret joined out of unsealed shards
#[derive(Debug, Clone)]
pub struct KeyPair {
    public: PublicKey,
    secret: SecretKey,
}

impl KeyPair {
    /// Generate a fresh random ephemeral key-pair
    pub fn generate() -> Self {
        let secret = SecretKey::generate();
        let public = secret.public();
        Self { public, secret }
    }

    /// Derive a key-pair deterministically from a wallet signature
    ///
    /// The signature bytes are hashed with Keccak-256 to obtain 32 bytes of
    /// seed entropy, which become the secret key directly. The same
    /// signature always yields the same pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the signature is not valid hex ("0x" prefix
    /// tolerated).
    pub fn from_signature(signature: &str) -> Result<Self, KeyError> {
        let sig = signature.strip_prefix("0x").unwrap_or(signature);
        let sig_bytes =
            hex::decode(sig).map_err(|_| anyhow::anyhow!("signature hex decode error"))?;

        let mut seed = [0u8; SECRET_KEY_SIZE];
        seed.copy_from_slice(&Keccak256::digest(&sig_bytes));

        let secret = SecretKey::from(seed);
        let public = secret.public();
        Ok(Self { public, secret })
    }

    /// Assemble a key-pair from a published public key and a recovered secret
    ///
    /// Used on the reconstructing side once all shards have been unsealed
    /// and rejoined. No consistency check is performed between the halves;
    /// a mismatched pair simply fails to open chat tokens.
    pub fn from_parts(public: PublicKey, secret: SecretKey) -> Self {
        Self { public, secret }
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    pub fn secret(&self) -> &SecretKey {
        &self.secret
    }
}
