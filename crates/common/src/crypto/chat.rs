//! Bluff chat token encryption using the NaCl box construction
//!
//! Chat messages travel through on-chain logs as opaque base64 tokens:
//! `base64(nonce (24 bytes) || box ciphertext)`. The token is self-contained
//! and order-dependent; the nonce always precedes the ciphertext.
//!
//! Both participants in a pairing hold the two halves of the *same* shared
//! game pair, so in practice a message sealed with
//! `(shared public, shared secret)` opens for both holders of the shared
//! secret. This gives confidentiality against third parties but no sender
//! authentication between the two participants.
//!
//! Decryption failure is an expected, non-exceptional outcome here: a party
//! may hold an out-of-date or mismatched key at any time, so
//! [`decrypt_message`] folds every decode or verification failure into
//! `None` rather than an error.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use crypto_box::aead::Aead;
use crypto_box::{Nonce, SalsaBox};

use super::keys::{PublicKey, SecretKey};

/// Size of the NaCl box nonce in bytes
pub const NONCE_SIZE: usize = 24;

/// Errors that can occur sealing a chat token
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat error: {0}")]
    Default(#[from] anyhow::Error),
}

/// Encrypt a chat message into a transportable token
///
/// Generates a fresh random 24-byte nonce for every call (never reused),
/// seals the UTF-8 bytes under `(their_public, my_secret)`, and emits
/// `base64(nonce || ciphertext)`.
///
/// # Errors
///
/// Returns an error only on sealing failure, which indicates an RNG or
/// key-material problem rather than anything the caller can recover from.
pub fn encrypt_message(
    message: &str,
    their_public: &PublicKey,
    my_secret: &SecretKey,
) -> Result<String, ChatError> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    getrandom::getrandom(&mut nonce_bytes)
        .map_err(|e| anyhow::anyhow!("failed to generate nonce: {}", e))?;
    let nonce = Nonce::from(nonce_bytes);

    let sealed = SalsaBox::new(their_public.as_box_key(), my_secret.as_box_key())
        .encrypt(&nonce, message.as_bytes())
        .map_err(|_| anyhow::anyhow!("box seal error"))?;

    let mut token = Vec::with_capacity(NONCE_SIZE + sealed.len());
    token.extend_from_slice(&nonce_bytes);
    token.extend_from_slice(&sealed);

    Ok(BASE64.encode(token))
}

/// Decrypt a chat token back into its message
///
/// Expects `base64(nonce (24 bytes) || ciphertext)`. Returns `None` on
/// malformed base64, truncated input, authentication failure, or invalid
/// UTF-8 plaintext; callers render a placeholder for undecryptable
/// messages instead of failing.
pub fn decrypt_message(
    token: &str,
    their_public: &PublicKey,
    my_secret: &SecretKey,
) -> Option<String> {
    let raw = BASE64.decode(token).ok()?;
    if raw.len() < NONCE_SIZE {
        return None;
    }

    let nonce = Nonce::from_slice(&raw[..NONCE_SIZE]);
    let plaintext = SalsaBox::new(their_public.as_box_key(), my_secret.as_box_key())
        .decrypt(nonce, &raw[NONCE_SIZE..])
        .ok()?;

    String::from_utf8(plaintext).ok()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::{join_key, split_key, KeyPair};

    #[test]
    fn test_shared_pair_roundtrip() {
        // both participants hold the halves of the same shared pair
        let shared = KeyPair::generate();
        let message = "nice carrot you have there";

        let token = encrypt_message(message, shared.public(), shared.secret()).unwrap();
        let decrypted = decrypt_message(&token, shared.public(), shared.secret()).unwrap();

        assert_eq!(message, decrypted);
    }

    #[test]
    fn test_two_distinct_pairs_roundtrip() {
        let alice = KeyPair::generate();
        let bob = KeyPair::generate();
        let message = "box B is empty, trust me";

        let token = encrypt_message(message, bob.public(), alice.secret()).unwrap();
        let decrypted = decrypt_message(&token, alice.public(), bob.secret()).unwrap();

        assert_eq!(message, decrypted);
    }

    #[test]
    fn test_nonce_freshness() {
        let shared = KeyPair::generate();

        let a = encrypt_message("hello", shared.public(), shared.secret()).unwrap();
        let b = encrypt_message("hello", shared.public(), shared.secret()).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_decrypt_never_panics_on_garbage() {
        let shared = KeyPair::generate();

        // empty input
        assert_eq!(decrypt_message("", shared.public(), shared.secret()), None);
        // not base64 at all
        assert_eq!(
            decrypt_message("!!not-base64!!", shared.public(), shared.secret()),
            None
        );
        // valid base64 but shorter than the nonce
        let short = BASE64.encode([0u8; NONCE_SIZE - 1]);
        assert_eq!(
            decrypt_message(&short, shared.public(), shared.secret()),
            None
        );
        // nonce-length input with no ciphertext
        let bare_nonce = BASE64.encode([0u8; NONCE_SIZE]);
        assert_eq!(
            decrypt_message(&bare_nonce, shared.public(), shared.secret()),
            None
        );
    }

    #[test]
    fn test_decrypt_with_wrong_key_returns_none() {
        let shared = KeyPair::generate();
        let interloper = KeyPair::generate();

        let token = encrypt_message("secret", shared.public(), shared.secret()).unwrap();

        assert_eq!(
            decrypt_message(&token, shared.public(), interloper.secret()),
            None
        );
    }

    #[test]
    fn test_tampered_token_returns_none() {
        let shared = KeyPair::generate();
        let token = encrypt_message("secret", shared.public(), shared.secret()).unwrap();

        let mut raw = BASE64.decode(&token).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0xff;
        let tampered = BASE64.encode(raw);

        assert_eq!(
            decrypt_message(&tampered, shared.public(), shared.secret()),
            None
        );
    }

    #[test]
    fn test_full_game_key_scenario() {
        // creator generates the game pair and shards the secret
        let game_keys = KeyPair::generate();
        let shards = split_key(&game_keys.secret().to_bytes()).unwrap();

        // counterparty rejoins the shards and rebuilds the pair
        let secret_bytes = join_key(&shards).unwrap();
        assert_eq!(secret_bytes, game_keys.secret().to_bytes());

        let rebuilt = KeyPair::from_parts(game_keys.public().clone(), secret_bytes.into());

        let message = "the carrot is in box A";
        let token = encrypt_message(message, game_keys.public(), game_keys.secret()).unwrap();
        let decrypted = decrypt_message(&token, rebuilt.public(), rebuilt.secret()).unwrap();

        assert_eq!(message, decrypted);
    }
}
