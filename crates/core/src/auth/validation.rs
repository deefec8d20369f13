//! Credential validation rules shared by registration and login.

use super::AuthError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validates a registration attempt.
///
/// The email should already be trimmed by the caller. Rejects empty
/// email/password and passwords shorter than [`MIN_PASSWORD_LEN`]. Uniqueness
/// is not checked here; that belongs to the storage layer.
pub fn validate_registration(email: &str, password: &str) -> Result<(), AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Validates a login attempt: both fields must be present.
///
/// Length is deliberately not re-checked so that accounts predating a policy
/// change can still sign in.
pub fn validate_login(email: &str, password: &str) -> Result<(), AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok(())
}
