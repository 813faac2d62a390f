//! Account records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Public view of a registered account. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    /// Opaque account identifier.
    pub user_id: String,
    /// Login name, stored lowercase.
    pub username: String,
    /// Contact address, unique across the registry.
    pub email: String,
    /// Deactivated accounts cannot resolve a bearer token.
    pub is_active: bool,
    /// Registration instant.
    pub created_at: DateTime<Utc>,
    /// Most recent successful authentication, if any.
    pub last_login: Option<DateTime<Utc>>,
}

/// Registry-internal record: the public view plus the stored hash.
pub(crate) struct StoredAccount {
    pub(crate) account: Account,
    pub(crate) password_hash: String,
}

impl fmt::Debug for StoredAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredAccount")
            .field("account", &self.account)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
