use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::PasswordHasher as _;
use argon2::{Argon2, PasswordHash, PasswordVerifier};

use crate::error::AppError;

/// Argon2id password hashing with per-call random salts.
///
/// Hashes are stored as PHC strings, so the salt and parameters travel with the
/// hash. Verification is constant-time.
#[derive(Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verifies a password against a stored PHC hash string.
    ///
    /// Returns `Ok(false)` on mismatch; a stored hash that cannot be parsed is
    /// a server-side anomaly and surfaces as an internal error.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored_hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let hasher = PasswordHasher::new();
        let password = "test_password123";
        let hashed = hasher.hash(password).unwrap();

        assert!(hasher.verify(password, &hashed).unwrap());
        assert!(!hasher.verify("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_each_hash_gets_a_fresh_salt() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash("same password").unwrap();
        let second = hasher.hash("same password").unwrap();

        // Same input, different salt, different PHC string; both still verify
        assert_ne!(first, second);
        assert!(hasher.verify("same password", &first).unwrap());
        assert!(hasher.verify("same password", &second).unwrap());
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        let hasher = PasswordHasher::new();
        match hasher.verify("test_password123", "invalidhashformat") {
            Err(AppError::Internal(_)) => {}
            other => panic!("expected internal error for malformed hash, got {:?}", other),
        }
    }
}
