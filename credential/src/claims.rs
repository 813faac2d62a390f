//! Session-token claims.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Claims carried by a session token: the identity it asserts, when it was
/// issued, and the absolute instant after which it is no longer valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Identity the token asserts.
    pub sub: String,
    /// Expiry (unix seconds).
    pub exp: i64,
    /// Issued-at (unix seconds).
    pub iat: i64,
}

impl Claims {
    /// Build claims for an identity expiring `expiry_minutes` from now.
    #[must_use]
    pub fn for_identity(identity_id: &str, expiry_minutes: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: identity_id.to_string(),
            exp: now + expiry_minutes * 60,
            iat: now,
        }
    }

    /// Whether the token is expired at `now` (unix seconds). Expiry is
    /// exclusive: a token is invalid at and after its `exp` instant, with no
    /// leeway.
    #[must_use]
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.exp
    }
}
