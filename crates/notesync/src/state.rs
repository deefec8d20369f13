//! Shared application state.
//!
//! Cloned into every request handler. Holds repository trait objects for
//! storage access plus the session cookie signing key; there is no other
//! cross-request state.

use std::sync::Arc;

use tower_cookies::Key;

use notesync_core::storage::{NoteRepository, UserRepository};

use crate::storage::sqlite::SqliteStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// User credential records.
    pub users: Arc<dyn UserRepository>,
    /// Owner-scoped note storage.
    pub notes: Arc<dyn NoteRepository>,
    /// Key signing the session cookie.
    pub cookie_key: Key,
}

impl AppState {
    /// Creates state backed by a single SQLite store.
    pub fn new(store: Arc<SqliteStore>, cookie_key: Key) -> Self {
        Self {
            users: store.clone(),
            notes: store,
            cookie_key,
        }
    }
}
