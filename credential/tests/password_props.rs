//! Property tests for password hashing.
//!
//! Case counts are kept low because each case pays for real Argon2 work
//! even at the reduced test-cost parameters.

use keygate_credential::{CredentialConfig, CredentialManager, MacAlgorithm};
use proptest::prelude::*;

fn manager() -> CredentialManager {
    CredentialManager::new(
        CredentialConfig::new("props-secret", MacAlgorithm::HS256).with_argon2_params(8, 1, 1),
    )
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 8, ..ProptestConfig::default() })]

    #[test]
    fn any_password_verifies_against_its_own_hash(p in "\\PC{1,32}") {
        let manager = manager();
        let hash = manager.hash_password(&p).unwrap();
        prop_assert!(manager.verify_password(&p, &hash).unwrap());
    }

    #[test]
    fn differing_passwords_do_not_cross_verify(p in "\\PC{1,32}", q in "\\PC{1,32}") {
        prop_assume!(p != q);
        let manager = manager();
        let hash = manager.hash_password(&q).unwrap();
        prop_assert!(!manager.verify_password(&p, &hash).unwrap());
    }

    #[test]
    fn rehashing_changes_the_string_but_not_the_outcome(p in "\\PC{1,32}") {
        let manager = manager();
        let first = manager.hash_password(&p).unwrap();
        let second = manager.hash_password(&p).unwrap();
        prop_assert_ne!(&first, &second);
        prop_assert!(manager.verify_password(&p, &first).unwrap());
        prop_assert!(manager.verify_password(&p, &second).unwrap());
    }
}
