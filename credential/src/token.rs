//! Compact session-token signing and validation.
//!
//! Tokens are three base64url segments joined by `.`:
//! `header.claims.signature`, MAC'd over the first two segments with the
//! configured HMAC variant. Validation order is fixed: shape, algorithm,
//! signature, then expiry — so a tampered token never reports `TokenExpired`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::algorithm::MacAlgorithm;
use crate::claims::Claims;
use crate::config::CredentialConfig;
use crate::error::{CredentialError, CredentialResult};

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

impl Header {
    fn new(algorithm: MacAlgorithm) -> Self {
        Self {
            alg: algorithm.name().to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Issue a signed token binding `identity_id` to an expiry
/// `expiry_minutes` from now, under the configuration's current secret.
pub(crate) fn issue(
    config: &CredentialConfig,
    identity_id: &str,
    expiry_minutes: i64,
) -> CredentialResult<String> {
    let secret = config.signing_secret();
    if secret.expose_secret().is_empty() {
        return Err(CredentialError::configuration(
            "signing secret is unset or empty",
        ));
    }

    let header = serde_json::to_vec(&Header::new(config.algorithm))
        .map_err(|e| CredentialError::ConfigurationError(format!("header encoding failed: {e}")))?;
    let claims = serde_json::to_vec(&Claims::for_identity(identity_id, expiry_minutes))
        .map_err(|e| CredentialError::ConfigurationError(format!("claims encoding failed: {e}")))?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(claims)
    );
    let signature = sign_bytes(
        config.algorithm,
        secret.expose_secret().as_bytes(),
        signing_input.as_bytes(),
    )?;

    Ok(format!(
        "{signing_input}.{}",
        URL_SAFE_NO_PAD.encode(signature.as_slice())
    ))
}

/// Validate a token and return the identity it asserts.
///
/// The signature must verify under the current secret or one of the
/// configured previous secrets; expiry is judged by this machine's clock at
/// the moment of the call, with zero leeway.
pub(crate) fn validate(config: &CredentialConfig, token: &str) -> CredentialResult<String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(CredentialError::token_invalid(
            "token must have exactly three segments",
        ));
    }
    let (header_b64, claims_b64, signature_b64) = (parts[0], parts[1], parts[2]);

    let header_json = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| CredentialError::token_invalid("header segment is not base64url"))?;
    let header: Header = serde_json::from_slice(&header_json)
        .map_err(|_| CredentialError::token_invalid("header segment is not valid JSON"))?;

    if header.alg.eq_ignore_ascii_case("none") {
        return Err(CredentialError::token_invalid(
            "unauthenticated \"none\" algorithm rejected",
        ));
    }
    if header.alg != config.algorithm.name() {
        return Err(CredentialError::TokenInvalid(format!(
            "disallowed algorithm: {}",
            header.alg
        )));
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| CredentialError::token_invalid("signature segment is not base64url"))?;
    let signing_input = format!("{header_b64}.{claims_b64}");

    // Current secret first, then rotated-out predecessors in order.
    let mut verified = verify_with(
        config.algorithm,
        config.signing_secret(),
        &signing_input,
        &signature,
    )?;
    if !verified {
        for previous in config.previous_secrets() {
            if verify_with(config.algorithm, previous, &signing_input, &signature)? {
                verified = true;
                break;
            }
        }
    }
    if !verified {
        return Err(CredentialError::token_invalid(
            "signature verification failed",
        ));
    }

    let claims_json = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| CredentialError::token_invalid("claims segment is not base64url"))?;
    let claims: Claims = serde_json::from_slice(&claims_json)
        .map_err(|_| CredentialError::token_invalid("claims segment is not valid JSON"))?;

    if claims.is_expired(chrono::Utc::now().timestamp()) {
        return Err(CredentialError::TokenExpired);
    }

    Ok(claims.sub)
}

fn verify_with(
    algorithm: MacAlgorithm,
    secret: &SecretString,
    signing_input: &str,
    signature: &[u8],
) -> CredentialResult<bool> {
    let expected = sign_bytes(
        algorithm,
        secret.expose_secret().as_bytes(),
        signing_input.as_bytes(),
    )?;
    Ok(expected.as_slice().ct_eq(signature).into())
}

fn sign_bytes(
    algorithm: MacAlgorithm,
    key: &[u8],
    data: &[u8],
) -> CredentialResult<Zeroizing<Vec<u8>>> {
    let rejected = |_| CredentialError::configuration("MAC key rejected");
    let bytes = match algorithm {
        MacAlgorithm::HS256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(rejected)?;
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        MacAlgorithm::HS384 => {
            let mut mac = Hmac::<Sha384>::new_from_slice(key).map_err(rejected)?;
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
        MacAlgorithm::HS512 => {
            let mut mac = Hmac::<Sha512>::new_from_slice(key).map_err(rejected)?;
            mac.update(data);
            mac.finalize().into_bytes().to_vec()
        }
    };
    Ok(Zeroizing::new(bytes))
}
