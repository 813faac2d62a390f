//! The credential manager: password hashing plus session-token lifecycle.

use crate::config::CredentialConfig;
use crate::error::CredentialResult;
use crate::{password, token};

/// Owns credential configuration and exposes the four credential
/// operations as plain synchronous calls.
///
/// Every operation is a pure function of its inputs and the configuration
/// captured at construction; the manager holds no mutable state and is safe
/// to share across any number of request-handling threads.
#[derive(Debug)]
pub struct CredentialManager {
    config: CredentialConfig,
}

impl CredentialManager {
    /// Create a manager over an explicit configuration value.
    #[must_use]
    pub fn new(config: CredentialConfig) -> Self {
        Self { config }
    }

    /// Create a manager from process environment variables.
    ///
    /// # Errors
    /// Returns `ConfigurationError` if `SECRET_KEY` is missing or empty, or
    /// if `ALGORITHM` / `ACCESS_TOKEN_EXPIRE_MINUTES` are set to unusable
    /// values.
    pub fn from_env() -> CredentialResult<Self> {
        Ok(Self::new(CredentialConfig::from_env()?))
    }

    /// The configuration this manager was built with.
    #[must_use]
    pub fn config(&self) -> &CredentialConfig {
        &self.config
    }

    /// Hash a plaintext password into a salted, algorithm-tagged string for
    /// persistence. Repeated calls on the same plaintext produce distinct
    /// hashes that all verify.
    ///
    /// # Errors
    /// `InvalidCredentialFormat` for an empty plaintext,
    /// `ConfigurationError` for unusable Argon2 parameters.
    pub fn hash_password(&self, plaintext: &str) -> CredentialResult<String> {
        password::hash_password(&self.config, plaintext)
    }

    /// Verify a plaintext password against a stored hash, in time
    /// independent of where a mismatch occurs.
    ///
    /// # Errors
    /// `InvalidCredentialFormat` if the stored hash cannot be parsed.
    pub fn verify_password(&self, plaintext: &str, stored_hash: &str) -> CredentialResult<bool> {
        password::verify_password(plaintext, stored_hash)
    }

    /// Issue a signed token asserting `identity_id` until `expiry_minutes`
    /// from now.
    ///
    /// # Errors
    /// `ConfigurationError` if the signing secret is unset or empty.
    pub fn issue_token(&self, identity_id: &str, expiry_minutes: i64) -> CredentialResult<String> {
        let issued = token::issue(&self.config, identity_id, expiry_minutes)?;
        tracing::debug!(identity = %identity_id, expiry_minutes, "issued session token");
        Ok(issued)
    }

    /// Issue a token with the configured default lifetime.
    ///
    /// # Errors
    /// Same failure modes as [`CredentialManager::issue_token`].
    pub fn issue_session_token(&self, identity_id: &str) -> CredentialResult<String> {
        self.issue_token(identity_id, self.config.access_token_expire_minutes)
    }

    /// Validate a bearer token and return the identity it asserts.
    ///
    /// Signature is checked before expiry, against the current secret and
    /// then any configured previous secrets; expiry is judged by this
    /// machine's clock at call time.
    ///
    /// # Errors
    /// `TokenInvalid` for malformed tokens, disallowed algorithms, or
    /// signature failures; `TokenExpired` once the expiry instant passes.
    pub fn validate_token(&self, token: &str) -> CredentialResult<String> {
        match token::validate(&self.config, token) {
            Ok(identity) => Ok(identity),
            Err(e) => {
                tracing::debug!(error = %e, "token rejected");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::MacAlgorithm;
    use crate::error::CredentialError;

    fn manager(secret: &str) -> CredentialManager {
        CredentialManager::new(
            CredentialConfig::new(secret, MacAlgorithm::HS256).with_argon2_params(8, 1, 1),
        )
    }

    #[test]
    fn token_roundtrip_returns_identity() {
        let manager = manager("test-secret-123456789012345678901234");
        let token = manager.issue_token("alice", 30).unwrap();
        assert!(!token.is_empty());
        assert_eq!(manager.validate_token(&token).unwrap(), "alice");
    }

    #[test]
    fn zero_expiry_token_expires_after_any_delay() {
        let manager = manager("test-secret-123456789012345678901234");
        let token = manager.issue_token("alice", 0).unwrap();

        std::thread::sleep(std::time::Duration::from_millis(1100));
        assert_eq!(
            manager.validate_token(&token).unwrap_err(),
            CredentialError::TokenExpired
        );
    }

    #[test]
    fn wrong_secret_fails_signature_verification() {
        let issuer = manager("test-secret-123456789012345678901234");
        let other = manager("wrong-secret-12345678901234567890123");
        let token = issuer.issue_token("alice", 30).unwrap();
        assert!(matches!(
            other.validate_token(&token),
            Err(CredentialError::TokenInvalid(_))
        ));
    }

    #[test]
    fn tampered_signature_segment_is_invalid() {
        let manager = manager("test-secret-123456789012345678901234");
        let token = manager.issue_token("alice", 30).unwrap();
        let (input, _) = token.rsplit_once('.').unwrap();
        let tampered = format!("{input}.AAAA");
        assert!(matches!(
            manager.validate_token(&tampered),
            Err(CredentialError::TokenInvalid(_))
        ));
    }

    #[test]
    fn empty_secret_fails_issuance_with_configuration_error() {
        let manager = CredentialManager::new(CredentialConfig::new("", MacAlgorithm::HS256));
        assert!(matches!(
            manager.issue_token("alice", 30),
            Err(CredentialError::ConfigurationError(_))
        ));
    }

    #[test]
    fn default_lifetime_comes_from_config() {
        let manager = CredentialManager::new(
            CredentialConfig::new("test-secret", MacAlgorithm::HS256).with_expire_minutes(1),
        );
        let token = manager.issue_session_token("alice").unwrap();
        assert_eq!(manager.validate_token(&token).unwrap(), "alice");
    }
}
