//! Credential handling for keygate: password hashing and signed
//! session-token issuance/validation.
//!
//! This crate provides:
//! - Argon2id password hashing with per-call salts
//! - Constant-time password and signature verification
//! - Compact HMAC-signed session tokens with strict expiry
//! - Secret rotation (validation under an ordered set of recent secrets)
//!
//! All operations are synchronous, stateless, pure functions of their
//! inputs plus an explicit [`CredentialConfig`]; the crate never touches
//! the network, the filesystem, or shared mutable state.

mod algorithm;
mod claims;
mod config;
mod error;
pub mod keygen;
mod manager;
mod password;
mod token;

pub use algorithm::MacAlgorithm;
pub use claims::Claims;
pub use config::{CredentialConfig, ALGORITHM_VAR, EXPIRE_MINUTES_VAR, SECRET_KEY_VAR};
pub use error::{CredentialError, CredentialResult};
pub use manager::CredentialManager;
