//! Static configuration for the credential manager.
//!
//! Configuration is an explicit value handed to [`CredentialManager::new`],
//! never ambient global state, so tests can run isolated managers with
//! distinct secrets side by side.
//!
//! [`CredentialManager::new`]: crate::CredentialManager::new

use secrecy::SecretString;

use crate::algorithm::MacAlgorithm;
use crate::error::{CredentialError, CredentialResult};

/// Environment variable holding the signing secret.
pub const SECRET_KEY_VAR: &str = "SECRET_KEY";
/// Environment variable naming the MAC scheme.
pub const ALGORITHM_VAR: &str = "ALGORITHM";
/// Environment variable holding the default token lifetime in minutes.
pub const EXPIRE_MINUTES_VAR: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";

fn default_expire_minutes() -> i64 {
    30
}

fn default_memory_cost() -> u32 {
    64 * 1024 // 64 MiB
}

fn default_time_cost() -> u32 {
    3
}

fn default_parallelism() -> u32 {
    4
}

/// Configuration consumed by [`CredentialManager`].
///
/// The signing secret and any rotated-out predecessors are held as
/// [`SecretString`] so they are redacted from `Debug` output and wiped on
/// drop.
///
/// [`CredentialManager`]: crate::CredentialManager
#[derive(Debug)]
pub struct CredentialConfig {
    signing_secret: SecretString,
    previous_secrets: Vec<SecretString>,
    /// MAC scheme used to sign and validate tokens.
    pub algorithm: MacAlgorithm,
    /// Token lifetime, in minutes, used when the caller does not pass one.
    pub access_token_expire_minutes: i64,
    /// Argon2 memory cost in KiB.
    pub argon2_memory_cost: u32,
    /// Argon2 iteration count.
    pub argon2_time_cost: u32,
    /// Argon2 lane count.
    pub argon2_parallelism: u32,
}

impl CredentialConfig {
    /// Create a configuration with the given secret and algorithm and
    /// default lifetime and hashing costs.
    ///
    /// An empty secret is accepted here; token issuance reports it as a
    /// [`CredentialError::ConfigurationError`] when actually used.
    pub fn new(secret: impl Into<String>, algorithm: MacAlgorithm) -> Self {
        Self {
            signing_secret: SecretString::from(secret.into()),
            previous_secrets: Vec::new(),
            algorithm,
            access_token_expire_minutes: default_expire_minutes(),
            argon2_memory_cost: default_memory_cost(),
            argon2_time_cost: default_time_cost(),
            argon2_parallelism: default_parallelism(),
        }
    }

    /// Build a configuration from process environment variables.
    ///
    /// `SECRET_KEY` is required and must be non-empty. `ALGORITHM` defaults
    /// to `HS256` and `ACCESS_TOKEN_EXPIRE_MINUTES` to 30 when unset.
    pub fn from_env() -> CredentialResult<Self> {
        let secret = std::env::var(SECRET_KEY_VAR)
            .map_err(|_| CredentialError::configuration("SECRET_KEY is not set"))?;
        if secret.is_empty() {
            return Err(CredentialError::configuration("SECRET_KEY is empty"));
        }

        let algorithm = match std::env::var(ALGORITHM_VAR) {
            Ok(name) => name.parse()?,
            Err(_) => MacAlgorithm::HS256,
        };

        let expire_minutes = match std::env::var(EXPIRE_MINUTES_VAR) {
            Ok(raw) => {
                let minutes: i64 = raw.parse().map_err(|_| {
                    CredentialError::ConfigurationError(format!(
                        "{EXPIRE_MINUTES_VAR} is not an integer"
                    ))
                })?;
                if minutes <= 0 {
                    return Err(CredentialError::ConfigurationError(format!(
                        "{EXPIRE_MINUTES_VAR} must be positive"
                    )));
                }
                minutes
            }
            Err(_) => default_expire_minutes(),
        };

        Ok(Self {
            access_token_expire_minutes: expire_minutes,
            ..Self::new(secret, algorithm)
        })
    }

    /// Register a rotated-out secret that remains acceptable for token
    /// validation. Issuance always uses the current secret only; validation
    /// tries the current secret first, then predecessors in the order given.
    #[must_use]
    pub fn with_previous_secret(mut self, secret: impl Into<String>) -> Self {
        self.previous_secrets.push(SecretString::from(secret.into()));
        self
    }

    /// Override the default token lifetime.
    #[must_use]
    pub fn with_expire_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expire_minutes = minutes;
        self
    }

    /// Override the Argon2 cost parameters (memory KiB, iterations, lanes).
    #[must_use]
    pub fn with_argon2_params(mut self, memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        self.argon2_memory_cost = memory_cost;
        self.argon2_time_cost = time_cost;
        self.argon2_parallelism = parallelism;
        self
    }

    pub(crate) fn signing_secret(&self) -> &SecretString {
        &self.signing_secret
    }

    pub(crate) fn previous_secrets(&self) -> &[SecretString] {
        &self.previous_secrets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let config = CredentialConfig::new("top-secret", MacAlgorithm::HS256)
            .with_previous_secret("old-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("old-secret"));
    }

    #[test]
    fn builder_overrides_apply() {
        let config = CredentialConfig::new("s", MacAlgorithm::HS512)
            .with_expire_minutes(5)
            .with_argon2_params(8, 1, 1);
        assert_eq!(config.algorithm, MacAlgorithm::HS512);
        assert_eq!(config.access_token_expire_minutes, 5);
        assert_eq!(config.argon2_memory_cost, 8);
        assert_eq!(config.argon2_time_cost, 1);
        assert_eq!(config.argon2_parallelism, 1);
    }
}
