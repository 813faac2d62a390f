//! Credential error types.

/// Credential operation result type.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Errors surfaced by the credential manager.
///
/// Every failure is returned to the caller immediately; nothing is retried
/// internally. Messages never contain secret material, plaintext passwords,
/// or token contents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// A stored password hash (or the plaintext handed to hashing) is not in
    /// a shape the manager can work with.
    #[error("invalid credential format: {0}")]
    InvalidCredentialFormat(String),
    /// The signing secret, algorithm, or hashing parameters are missing or
    /// unusable.
    #[error("configuration error: {0}")]
    ConfigurationError(String),
    /// The token's expiry instant has elapsed.
    #[error("token expired")]
    TokenExpired,
    /// The token is malformed, carries a disallowed algorithm, or its
    /// signature does not verify.
    #[error("invalid token: {0}")]
    TokenInvalid(String),
}

impl CredentialError {
    /// Create an invalid-token error.
    #[inline]
    #[must_use]
    pub fn token_invalid(msg: &str) -> Self {
        CredentialError::TokenInvalid(msg.to_string())
    }

    /// Create a configuration error.
    #[inline]
    #[must_use]
    pub fn configuration(msg: &str) -> Self {
        CredentialError::ConfigurationError(msg.to_string())
    }
}
