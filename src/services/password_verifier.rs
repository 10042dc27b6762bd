//! Password verification seam.
//!
//! The authentication service depends on this trait rather than on the
//! hashing crate, so tests and alternative schemes can swap the
//! implementation at construction time.

use crate::domain::Password;

/// One-way comparison of a supplied secret against a stored digest.
pub trait PasswordVerifier: Send + Sync {
    /// True when the plaintext secret matches the stored digest.
    ///
    /// Must not log or retain the plaintext. A malformed digest compares
    /// as false.
    fn verify(&self, plain_secret: &str, stored_digest: &str) -> bool;
}

/// Argon2id-backed verifier over the domain password value object.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Verifier;

impl PasswordVerifier for Argon2Verifier {
    fn verify(&self, plain_secret: &str, stored_digest: &str) -> bool {
        Password::from_hash(stored_digest.to_string()).verify(plain_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_matching_secret() {
        let digest = Password::new("any_password").unwrap().into_string();
        let verifier = Argon2Verifier;

        assert!(verifier.verify("any_password", &digest));
        assert!(!verifier.verify("wrong password", &digest));
    }

    #[test]
    fn malformed_digest_compares_false() {
        let verifier = Argon2Verifier;
        assert!(!verifier.verify("any_password", "garbage"));
    }
}
