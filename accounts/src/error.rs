//! Account and login errors.

/// Account operation result type.
pub type AccountResult<T> = Result<T, AccountError>;

/// Errors surfaced by the account registry and login service.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Username is not 3–50 alphanumeric characters.
    #[error("username must be 3-50 alphanumeric characters")]
    InvalidUsername,
    /// Password is shorter than the minimum length.
    #[error("password must be at least 8 characters")]
    WeakPassword,
    /// Username already registered.
    #[error("username already exists")]
    UsernameTaken,
    /// Email already registered.
    #[error("email already exists")]
    EmailTaken,
    /// Unknown account or wrong password. Deliberately does not say which.
    #[error("invalid username or password")]
    InvalidCredentials,
    /// Account exists but has been deactivated.
    #[error("account is inactive")]
    Inactive,
    /// No account with the given username.
    #[error("account not found")]
    NotFound,
    /// Too many login attempts in the current window.
    #[error("too many login attempts, try again in {0:?}")]
    RateLimited(std::time::Duration),
    /// Failure inside the credential manager.
    #[error(transparent)]
    Credential(#[from] keygate_credential::CredentialError),
}
