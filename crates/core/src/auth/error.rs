use thiserror::Error;

/// Errors raised by registration, login, and password handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email and password are required.")]
    MissingCredentials,

    #[error("Password must be at least {min} characters long.")]
    WeakPassword { min: usize },

    #[error("Email already registered. Please use a different email or log in.")]
    DuplicateEmail,

    /// Returned identically for an unknown email and a wrong password so the
    /// response never reveals which one it was.
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hash(String),
}
