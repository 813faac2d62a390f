//! Random secret and session-id generation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;

/// Characters drawn on when generating a signing secret.
const SECRET_KEY_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Recommended signing-secret length.
pub const DEFAULT_SECRET_KEY_LEN: usize = 32;

/// Generate a random signing secret of `length` characters, suitable for
/// the `SECRET_KEY` configuration value.
#[must_use]
pub fn generate_secret_key(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..SECRET_KEY_ALPHABET.len());
            SECRET_KEY_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a unique, URL-safe session identifier.
#[must_use]
pub fn generate_session_id() -> String {
    let mut rng = rand::rng();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_key_has_requested_length_and_alphabet() {
        let key = generate_secret_key(DEFAULT_SECRET_KEY_LEN);
        assert_eq!(key.len(), DEFAULT_SECRET_KEY_LEN);
        assert!(key.bytes().all(|b| SECRET_KEY_ALPHABET.contains(&b)));
    }

    #[test]
    fn session_ids_are_unique_and_url_safe() {
        let first = generate_session_id();
        let second = generate_session_id();
        assert_ne!(first, second);
        assert!(URL_SAFE_NO_PAD.decode(&first).is_ok());
    }
}
