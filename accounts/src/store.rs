//! In-memory account registry.
//!
//! Accounts live in a process-local map keyed by lowercase username. The
//! registry owns account records and their stored hashes; all hashing and
//! verification is delegated to the credential manager, and password
//! hashing always happens outside the map lock.

use std::collections::HashMap;

use chrono::Utc;
use keygate_credential::CredentialManager;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::account::{Account, StoredAccount};
use crate::error::{AccountError, AccountResult};

/// Minimum password length accepted at registration and password change.
const MIN_PASSWORD_LEN: usize = 8;
/// Username length bounds.
const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 50;

/// Thread-safe, in-memory account registry.
#[derive(Debug, Default)]
pub struct AccountStore {
    accounts: RwLock<HashMap<String, StoredAccount>>,
}

impl AccountStore {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account and return its generated user id.
    ///
    /// # Errors
    /// `InvalidUsername`, `WeakPassword`, `UsernameTaken`, or `EmailTaken`
    /// on validation failure; credential errors propagate from hashing.
    pub fn register(
        &self,
        manager: &CredentialManager,
        username: &str,
        email: &str,
        password: &str,
    ) -> AccountResult<String> {
        let username = normalize_username(username)?;
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AccountError::WeakPassword);
        }

        // Cheap precheck before paying for Argon2 work.
        {
            let accounts = self.accounts.read();
            check_unique(&accounts, &username, email)?;
        }

        let password_hash = manager.hash_password(password)?;

        let mut accounts = self.accounts.write();
        // Re-check under the write lock; another thread may have won the race.
        check_unique(&accounts, &username, email)?;

        let user_id = Uuid::new_v4().to_string();
        accounts.insert(
            username.clone(),
            StoredAccount {
                account: Account {
                    user_id: user_id.clone(),
                    username: username.clone(),
                    email: email.to_string(),
                    is_active: true,
                    created_at: Utc::now(),
                    last_login: None,
                },
                password_hash,
            },
        );
        tracing::debug!(username = %username, "account registered");

        Ok(user_id)
    }

    /// Authenticate a username/password pair.
    ///
    /// Updates `last_login` and returns the account on success. Unknown
    /// usernames and wrong passwords both fail with `InvalidCredentials`.
    pub fn authenticate(
        &self,
        manager: &CredentialManager,
        username: &str,
        password: &str,
    ) -> AccountResult<Account> {
        let username = match normalize_username(username) {
            Ok(name) => name,
            // A name that could never have registered gets the same answer
            // as an unknown one.
            Err(_) => return Err(AccountError::InvalidCredentials),
        };

        let stored_hash = {
            let accounts = self.accounts.read();
            accounts
                .get(&username)
                .map(|stored| stored.password_hash.clone())
        };
        let Some(stored_hash) = stored_hash else {
            return Err(AccountError::InvalidCredentials);
        };

        if !manager.verify_password(password, &stored_hash)? {
            tracing::warn!(username = %username, "authentication failed");
            return Err(AccountError::InvalidCredentials);
        }

        let mut accounts = self.accounts.write();
        let stored = accounts
            .get_mut(&username)
            .ok_or(AccountError::InvalidCredentials)?;
        stored.account.last_login = Some(Utc::now());
        Ok(stored.account.clone())
    }

    /// Replace an account's stored hash. The only path that ever replaces a
    /// hash; requires the current password.
    ///
    /// # Errors
    /// `InvalidCredentials` if the old password is wrong, `WeakPassword` if
    /// the new one is too short.
    pub fn change_password(
        &self,
        manager: &CredentialManager,
        username: &str,
        old_password: &str,
        new_password: &str,
    ) -> AccountResult<()> {
        let username = normalize_username(username)?;
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(AccountError::WeakPassword);
        }

        let stored_hash = {
            let accounts = self.accounts.read();
            accounts
                .get(&username)
                .map(|stored| stored.password_hash.clone())
        };
        let Some(stored_hash) = stored_hash else {
            return Err(AccountError::InvalidCredentials);
        };
        if !manager.verify_password(old_password, &stored_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        let new_hash = manager.hash_password(new_password)?;

        let mut accounts = self.accounts.write();
        let stored = accounts
            .get_mut(&username)
            .ok_or(AccountError::NotFound)?;
        stored.password_hash = new_hash;
        tracing::debug!(username = %username, "password changed");
        Ok(())
    }

    /// Activate or deactivate an account.
    ///
    /// # Errors
    /// `NotFound` if no such username is registered.
    pub fn set_active(&self, username: &str, active: bool) -> AccountResult<()> {
        let username = normalize_username(username)?;
        let mut accounts = self.accounts.write();
        let stored = accounts.get_mut(&username).ok_or(AccountError::NotFound)?;
        stored.account.is_active = active;
        Ok(())
    }

    /// Look up an account by username.
    #[must_use]
    pub fn get(&self, username: &str) -> Option<Account> {
        let username = normalize_username(username).ok()?;
        self.accounts
            .read()
            .get(&username)
            .map(|stored| stored.account.clone())
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

fn normalize_username(raw: &str) -> AccountResult<String> {
    let name = raw.trim();
    if name.len() < MIN_USERNAME_LEN
        || name.len() > MAX_USERNAME_LEN
        || !name.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return Err(AccountError::InvalidUsername);
    }
    Ok(name.to_ascii_lowercase())
}

fn check_unique(
    accounts: &HashMap<String, StoredAccount>,
    username: &str,
    email: &str,
) -> AccountResult<()> {
    if accounts.contains_key(username) {
        return Err(AccountError::UsernameTaken);
    }
    if accounts.values().any(|stored| stored.account.email == email) {
        return Err(AccountError::EmailTaken);
    }
    Ok(())
}
