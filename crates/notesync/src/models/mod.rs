//! Request payloads for the HTTP surface.

use std::fmt;

use serde::Deserialize;

/// Form payload for POST /register and POST /login.
#[derive(Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

// Hand-written so the raw password can never end up in a log line.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Form payload for POST /notes and PUT /notes/{id}.
#[derive(Debug, Deserialize)]
pub struct NotePayload {
    pub content: String,
}

/// Query parameters for GET /notes.
#[derive(Debug, Default, Deserialize)]
pub struct ListNotesQuery {
    /// Case-insensitive substring filter.
    pub q: Option<String>,
}
