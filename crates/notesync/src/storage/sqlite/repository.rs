//! SQLite store implementation.
//!
//! Implements the repository traits from `notesync_core::storage` using
//! SQLite. A single background connection serializes all access; every
//! operation runs as a closure on that connection's thread.

use std::path::Path;

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use notesync_core::auth::{User, UserId};
use notesync_core::notes::{Note, NoteId};
use notesync_core::storage::{NoteRepository, RepositoryError, Result, UserRepository};

use super::conversions::{self, format_datetime, row_to_note, row_to_user};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based store.
///
/// Provides async access to SQLite storage for users and notes.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new store backed by a database file.
    ///
    /// The file is created if it doesn't exist. The schema is created and,
    /// for stores written before notes carried an owner, migrated in place.
    pub async fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        let store = Self { conn };
        store.init_schema().await?;

        Ok(store)
    }

    /// Creates a new store with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        let store = Self { conn };
        store.init_schema().await?;

        Ok(store)
    }

    /// Initialize the database schema. Safe to call more than once.
    ///
    /// Runs in three steps on the connection thread: create tables, add the
    /// `user_id` column to legacy notes tables that predate ownership, then
    /// create indexes. The index on `notes(user_id)` must come last or it
    /// would fail against an unmigrated table.
    pub async fn init_schema(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.pragma_update(None, "foreign_keys", true)
                    .map_err(wrap_err)?;

                conn.execute_batch(schema::CREATE_TABLES)
                    .map_err(wrap_err)?;

                let has_owner_column = {
                    let mut stmt = conn
                        .prepare(schema::TABLE_INFO_NOTES)
                        .map_err(wrap_err)?;
                    let mut names = stmt
                        .query_map([], |row| row.get::<_, String>(1))
                        .map_err(wrap_err)?;
                    names.any(|name| matches!(name, Ok(ref n) if n == "user_id"))
                };

                if !has_owner_column {
                    conn.execute(schema::ADD_NOTES_OWNER_COLUMN, [])
                        .map_err(wrap_err)?;
                }

                conn.execute_batch(schema::CREATE_INDEXES)
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Schema"))
    }
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        let email = email.to_string();
        let password_hash = password_hash.to_string();
        let email_for_error = email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(schema::INSERT_USER, rusqlite::params![email, password_hash])
                    .map_err(wrap_err)?;
                Ok(User {
                    id: conn.last_insert_rowid(),
                    email,
                    password_hash,
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "User", email_for_error))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_USER_BY_EMAIL)
                    .map_err(wrap_err)?;
                match stmt.query_row([&email], row_to_user) {
                    Ok(user) => Ok(Some(user)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User"))
    }
}

#[async_trait]
impl NoteRepository for SqliteStore {
    async fn list_notes(&self, owner_id: UserId, query: Option<&str>) -> Result<Vec<Note>> {
        let pattern = query.map(|q| format!("%{}%", q.to_lowercase()));

        self.conn
            .call(move |conn| {
                let mut notes = Vec::new();
                match pattern {
                    Some(pattern) => {
                        let mut stmt = conn
                            .prepare(schema::SELECT_NOTES_FOR_OWNER_MATCHING)
                            .map_err(wrap_err)?;
                        let rows = stmt
                            .query_map(rusqlite::params![owner_id, pattern], row_to_note)
                            .map_err(wrap_err)?;
                        for row_result in rows {
                            notes.push(row_result.map_err(wrap_err)?);
                        }
                    }
                    None => {
                        let mut stmt = conn
                            .prepare(schema::SELECT_NOTES_FOR_OWNER)
                            .map_err(wrap_err)?;
                        let rows = stmt
                            .query_map([owner_id], row_to_note)
                            .map_err(wrap_err)?;
                        for row_result in rows {
                            notes.push(row_result.map_err(wrap_err)?);
                        }
                    }
                }
                Ok(notes)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note"))
    }

    async fn create_note(&self, owner_id: UserId, content: &str) -> Result<Note> {
        let content = content.to_string();
        let date = conversions::now();
        let date_str = format_datetime(&date);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_NOTE,
                    rusqlite::params![content, date_str, owner_id],
                )
                .map_err(wrap_err)?;
                Ok(Note {
                    id: conn.last_insert_rowid(),
                    content,
                    date,
                    user_id: owner_id,
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note"))
    }

    async fn get_note(&self, owner_id: UserId, note_id: NoteId) -> Result<Option<Note>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_NOTE_OWNED).map_err(wrap_err)?;
                match stmt.query_row(rusqlite::params![note_id, owner_id], row_to_note) {
                    Ok(note) => Ok(Some(note)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note"))
    }

    async fn update_note(
        &self,
        owner_id: UserId,
        note_id: NoteId,
        content: &str,
    ) -> Result<Option<Note>> {
        let content = content.to_string();

        self.conn
            .call(move |conn| {
                let existing = {
                    let mut stmt = conn.prepare(schema::SELECT_NOTE_OWNED).map_err(wrap_err)?;
                    match stmt.query_row(rusqlite::params![note_id, owner_id], row_to_note) {
                        Ok(note) => note,
                        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                        Err(e) => return Err(wrap_err(e)),
                    }
                };

                // An edit within the clock's resolution still has to move
                // the timestamp forward so ordering by date stays strict.
                let date = conversions::now()
                    .max(existing.date + chrono::Duration::microseconds(1));
                conn.execute(
                    schema::UPDATE_NOTE_OWNED,
                    rusqlite::params![note_id, owner_id, content, format_datetime(&date)],
                )
                .map_err(wrap_err)?;

                Ok(Some(Note {
                    id: note_id,
                    content,
                    date,
                    user_id: owner_id,
                }))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note"))
    }

    async fn delete_note(&self, owner_id: UserId, note_id: NoteId) -> Result<bool> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_NOTE_OWNED, rusqlite::params![note_id, owner_id])
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Note"))
    }
}
