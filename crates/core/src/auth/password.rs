//! Password hashing and verification with Argon2id.
//!
//! [`hash_password`] generates a random salt via `OsRng`, hashes the raw
//! password with the default (memory-hard) Argon2id parameters, and returns a
//! PHC-format string (`$argon2id$v=19$...`) for the `password_hash` column.
//! [`verify_password`] parses a stored PHC string and runs the crate's
//! constant-time comparison against the candidate password.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use super::AuthError;

/// Hashes a raw password. The input is never logged or stored.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Checks a candidate password against a stored PHC-format hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash itself is
/// malformed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let hash = hash_password("secret1").unwrap();
        assert!(verify_password("secret1", &hash).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let hash = hash_password("secret1").unwrap();
        assert!(!verify_password("wrongpass", &hash).unwrap());
    }

    #[test]
    fn hash_is_phc_format_and_salted() {
        let first = hash_password("secret1").unwrap();
        let second = hash_password("secret1").unwrap();
        assert!(first.starts_with("$argon2id$"));
        // Random salts: identical passwords must not share a hash.
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert!(matches!(
            verify_password("secret1", "not-a-phc-string"),
            Err(AuthError::Hash(_))
        ));
    }
}
