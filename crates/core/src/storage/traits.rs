use async_trait::async_trait;

use crate::auth::{User, UserId};
use crate::notes::{Note, NoteId};

use super::Result;

/// Repository for user credential records.
///
/// Users are created at registration and read back at login; they are never
/// updated or deleted.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a new user.
    ///
    /// A duplicate email fails with [`RepositoryError::AlreadyExists`]
    /// (`UNIQUE` constraint); this is the authoritative, race-safe guard
    /// behind the caller's fast pre-check.
    ///
    /// [`RepositoryError::AlreadyExists`]: super::RepositoryError::AlreadyExists
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User>;

    /// Looks up a user by exact, case-sensitive email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Repository for note operations.
///
/// Every operation takes the owner's id and is scoped to it; a note belonging
/// to another user behaves exactly like a missing one.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Lists the owner's notes, newest first by modification timestamp.
    ///
    /// A non-empty `query` filters to notes whose content contains it as a
    /// case-insensitive substring.
    async fn list_notes(&self, owner_id: UserId, query: Option<&str>) -> Result<Vec<Note>>;

    /// Inserts a note with the current timestamp. Content must already be
    /// validated.
    async fn create_note(&self, owner_id: UserId, content: &str) -> Result<Note>;

    /// Gets one of the owner's notes. `None` for missing and foreign ids
    /// alike.
    async fn get_note(&self, owner_id: UserId, note_id: NoteId) -> Result<Option<Note>>;

    /// Updates content and timestamp of one of the owner's notes. `None`
    /// when no owned row matched.
    async fn update_note(
        &self,
        owner_id: UserId,
        note_id: NoteId,
        content: &str,
    ) -> Result<Option<Note>>;

    /// Deletes one of the owner's notes. `false` when no owned row matched.
    async fn delete_note(&self, owner_id: UserId, note_id: NoteId) -> Result<bool>;
}
