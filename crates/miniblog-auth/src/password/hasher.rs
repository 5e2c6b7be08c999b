//! Argon2id password hashing and verification.

use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use miniblog_core::error::AppError;

/// Hashes and checks the credential stored on each user record.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        let _ = dummy_hash();
        Self
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        if password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `Ok(false)` on mismatch; a hash that cannot be parsed is an
    /// internal error, not a failed login.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Checks a login attempt against the stored hash, if there is one.
    ///
    /// A missing user still pays for a full verification against a fixed
    /// hash, so response time does not reveal which usernames exist.
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<bool, AppError> {
        match stored_hash {
            Some(hash) => self.verify_password(password, hash),
            None => {
                if let Some(dummy) = dummy_hash() {
                    self.verify_password(password, dummy)?;
                }
                Ok(false)
            }
        }
    }
}

/// Argon2id hash of a throwaway password, with the same parameters as real
/// hashes. Computed once per process.
fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| {
            let salt = SaltString::encode_b64(b"miniblog-dummy-salt").ok()?;
            Argon2::default()
                .hash_password(b"miniblog-dummy-password", &salt)
                .ok()
                .map(|hash| hash.to_string())
        })
        .as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use miniblog_core::ErrorKind;

    #[test]
    fn test_hash_then_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("miniblog1234").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("miniblog1234", &hash).unwrap());
        assert!(!hasher.verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_empty_password_rejected() {
        let err = PasswordHasher::new().hash_password("").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_missing_user_runs_full_verification() {
        let hasher = PasswordHasher::new();
        let real = hasher.hash_password("miniblog1234").unwrap();
        let dummy = dummy_hash().expect("dummy hash available");

        let real = PasswordHash::new(&real).unwrap();
        let dummy = PasswordHash::new(dummy).unwrap();
        assert_eq!(dummy.algorithm, real.algorithm);
        assert_eq!(dummy.version, real.version);
        assert_eq!(dummy.params, real.params);

        assert!(!hasher.verify_credentials("miniblog1234", None).unwrap());
        assert!(
            !hasher
                .verify_credentials("miniblog-dummy-password", None)
                .unwrap()
        );
    }

    #[test]
    fn test_verify_credentials_with_stored_hash() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash_password("miniblog1234").unwrap();
        assert!(hasher.verify_credentials("miniblog1234", Some(&hash)).unwrap());
        assert!(!hasher.verify_credentials("nope", Some(&hash)).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_internal() {
        let err = PasswordHasher::new()
            .verify_password("x", "not-a-hash")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Internal);
    }
}
