//! MAC algorithm selection for session-token signing.

use std::fmt;
use std::str::FromStr;

use crate::error::CredentialError;

/// Symmetric MAC schemes accepted for token signing.
///
/// Only authenticated HMAC variants are representable; the unauthenticated
/// `none` algorithm is rejected at parse time and again during token
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacAlgorithm {
    /// HMAC with SHA-256.
    HS256,
    /// HMAC with SHA-384.
    HS384,
    /// HMAC with SHA-512.
    HS512,
}

impl MacAlgorithm {
    /// Wire-format name used in the token header's `alg` field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MacAlgorithm::HS256 => "HS256",
            MacAlgorithm::HS384 => "HS384",
            MacAlgorithm::HS512 => "HS512",
        }
    }
}

impl fmt::Display for MacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MacAlgorithm {
    type Err = CredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(MacAlgorithm::HS256),
            "HS384" => Ok(MacAlgorithm::HS384),
            "HS512" => Ok(MacAlgorithm::HS512),
            other if other.eq_ignore_ascii_case("none") => Err(
                CredentialError::configuration("unauthenticated \"none\" algorithm is not permitted"),
            ),
            other => Err(CredentialError::ConfigurationError(format!(
                "unsupported MAC algorithm: {other}"
            ))),
        }
    }
}
