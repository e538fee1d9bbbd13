use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Well-formed digest with the same work factor as real ones. No password
/// matches it.
const DECOY_DIGEST: &str = concat!(
    "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$",
    "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"
);

/// Password hashing implementation.
///
/// Argon2id with a fixed work factor (19 MiB memory, 2 passes, 1 lane) and a
/// random per-password salt. The work factor is pinned rather than taken from
/// the crate defaults so stored digests stay comparable across upgrades.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher configured with the fixed Argon2id work factor
    pub fn new() -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::DEFAULT),
        }
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Comparison is constant-time inside the Argon2 primitive.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl PasswordHasher {
    /// Run a full verification against a digest nobody owns.
    ///
    /// Used when the account does not exist so the failure costs as much as a
    /// wrong password.
    pub fn verify_decoy(&self, password: &str) {
        let _ = self.verify(password, DECOY_DIGEST);
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify(&format!("{}x", password), &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same_password").unwrap();
        let second = hasher.hash("same_password").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("plaintext-marker").unwrap();
        assert!(!hash.contains("plaintext-marker"));
    }

    #[test]
    fn test_decoy_digest_uses_real_work_factor() {
        let hasher = PasswordHasher::new();
        let real = hasher.hash("anything").unwrap();
        let real = PasswordHash::new(&real).unwrap();
        let decoy = PasswordHash::new(DECOY_DIGEST).unwrap();

        assert_eq!(decoy.algorithm, real.algorithm);
        assert_eq!(decoy.params, real.params);
        assert_eq!(hasher.verify("anything", DECOY_DIGEST), Ok(false));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();
        let result = hasher.verify("password", "invalid_hash");
        assert!(result.is_err());
    }
}
