use serde::{Deserialize, Serialize};

/// Server-assigned, monotonically increasing user identifier.
pub type UserId = i64;

/// A registered user, as stored.
///
/// Deliberately not `Serialize`: the password hash must never leave the
/// process. Handlers respond with [`SessionUser`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// PHC-format Argon2id hash. Never the raw password.
    pub password_hash: String,
}

/// The identity an authenticated session carries: user id and email, nothing
/// else. Doubles as the public response shape for auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}
