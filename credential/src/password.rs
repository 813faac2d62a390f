//! Password hashing and verification using Argon2id.
//!
//! Hashes are PHC strings: algorithm-tagged, salted per call, and carrying
//! their own cost parameters, so verification never consults configuration.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::CredentialConfig;
use crate::error::{CredentialError, CredentialResult};

/// Hash a plaintext password into a self-describing PHC string.
///
/// Each call generates a fresh random salt, so hashing the same plaintext
/// twice yields distinct strings that both verify.
pub(crate) fn hash_password(config: &CredentialConfig, plaintext: &str) -> CredentialResult<String> {
    if plaintext.is_empty() {
        return Err(CredentialError::InvalidCredentialFormat(
            "plaintext password must not be empty".to_string(),
        ));
    }

    let hasher = argon2_instance(config)?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| CredentialError::ConfigurationError(format!("password hashing failed: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch. A stored hash that cannot be parsed
/// fails with [`CredentialError::InvalidCredentialFormat`]. The underlying
/// digest comparison is constant-time.
pub(crate) fn verify_password(plaintext: &str, stored_hash: &str) -> CredentialResult<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        CredentialError::InvalidCredentialFormat(format!("malformed stored hash: {e}"))
    })?;

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CredentialError::InvalidCredentialFormat(format!(
            "stored hash rejected: {e}"
        ))),
    }
}

fn argon2_instance(config: &CredentialConfig) -> CredentialResult<Argon2<'static>> {
    let params = argon2::Params::new(
        config.argon2_memory_cost,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| CredentialError::ConfigurationError(format!("invalid Argon2 parameters: {e}")))?;

    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}
