//! Client side of the FHE coprocessor boundary
//!
//! The coprocessor is an opaque remote oracle: values go in and come back
//! as ciphertext handles, and previously published handles can be unsealed
//! for an authorized account. Everything here may suspend for a network
//! round trip.
//!
//! - [`backend`]: the narrow typed capability interface to the oracle SDK
//! - [`wallet`]: the browser-wallet seam (chain switch, signer address)
//! - [`session`]: lazily-initialized single-flight session plus permit
//!   lifecycle on top of the two seams

mod backend;
mod session;
mod wallet;

pub use backend::{CiphertextHandle, FheType, FheValue, OracleBackend, OracleError, Permit};
pub use session::OracleSession;
pub use wallet::{Address, WalletProvider};
