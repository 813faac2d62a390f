//! Login service wiring the registry, the credential manager, and the
//! attempt limiter together.

use keygate_credential::CredentialManager;

use crate::account::Account;
use crate::error::{AccountError, AccountResult};
use crate::limiter::LoginRateLimiter;
use crate::store::AccountStore;

/// Register/login/current-user flows over an in-memory registry.
///
/// The service owns its store and limiter; the credential manager is taken
/// at construction so its secrets and costs are explicit per instance.
#[derive(Debug)]
pub struct AuthService {
    manager: CredentialManager,
    store: AccountStore,
    limiter: LoginRateLimiter,
}

impl AuthService {
    /// Create a service with an empty registry and default attempt limits.
    #[must_use]
    pub fn new(manager: CredentialManager) -> Self {
        Self::with_limiter(manager, LoginRateLimiter::default())
    }

    /// Create a service with a custom attempt limiter.
    #[must_use]
    pub fn with_limiter(manager: CredentialManager, limiter: LoginRateLimiter) -> Self {
        Self {
            manager,
            store: AccountStore::new(),
            limiter,
        }
    }

    /// The underlying registry.
    #[must_use]
    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// The underlying credential manager.
    #[must_use]
    pub fn manager(&self) -> &CredentialManager {
        &self.manager
    }

    /// Register a new account and return its user id.
    pub fn register(&self, username: &str, email: &str, password: &str) -> AccountResult<String> {
        self.store.register(&self.manager, username, email, password)
    }

    /// Authenticate and issue a session token for the account.
    ///
    /// Attempts count against the per-username window whether or not the
    /// password matches.
    ///
    /// # Errors
    /// `RateLimited` when the window is exhausted, `InvalidCredentials` for
    /// unknown users or wrong passwords; credential errors propagate from
    /// token issuance.
    pub fn login(&self, username: &str, password: &str) -> AccountResult<String> {
        let key = username.trim().to_ascii_lowercase();
        if let Err(retry_after) = self.limiter.try_acquire(&key) {
            tracing::warn!(username = %key, ?retry_after, "login rate limited");
            return Err(AccountError::RateLimited(retry_after));
        }

        let account = self.store.authenticate(&self.manager, username, password)?;
        let token = self.manager.issue_session_token(&account.username)?;
        tracing::debug!(username = %account.username, "login succeeded");
        Ok(token)
    }

    /// Resolve a bearer token to the account it asserts.
    ///
    /// # Errors
    /// Token errors propagate from validation; a token naming an
    /// unregistered account fails with `InvalidCredentials`, a deactivated
    /// account with `Inactive`.
    pub fn current_user(&self, token: &str) -> AccountResult<Account> {
        let username = self.manager.validate_token(token)?;
        let account = self
            .store
            .get(&username)
            .ok_or(AccountError::InvalidCredentials)?;
        if !account.is_active {
            return Err(AccountError::Inactive);
        }
        Ok(account)
    }
}
