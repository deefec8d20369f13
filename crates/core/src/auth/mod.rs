//! Credentials and session identity.

mod error;
mod password;
mod types;
mod validation;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use types::{SessionUser, User, UserId};
pub use validation::{validate_login, validate_registration, MIN_PASSWORD_LEN};
