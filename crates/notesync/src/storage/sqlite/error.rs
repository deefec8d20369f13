//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` to `RepositoryError` from
//! `notesync_core::storage`. Only errors that can actually escape this store
//! get a semantic variant: the UNIQUE constraint on `users.email`, the
//! foreign key from `notes.user_id`, and failure to open the database file.
//! Row absence never reaches the mapper; the repository turns
//! `QueryReturnedNoRows` into `Ok(None)` at the query site.

use notesync_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// - `SQLITE_CONSTRAINT_UNIQUE` → `RepositoryError::AlreadyExists`
/// - `SQLITE_CONSTRAINT_FOREIGNKEY` → `RepositoryError::InvalidData`
/// - `CannotOpen` → `RepositoryError::ConnectionFailed`
/// - everything else → `RepositoryError::QueryFailed`
fn map_rusqlite_error(
    err: &rusqlite::Error,
    entity_type: &'static str,
    id: &str,
) -> RepositoryError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::AlreadyExists {
                entity_type,
                id: id.to_string(),
            }
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            RepositoryError::InvalidData(format!(
                "Foreign key constraint violation for {entity_type}"
            ))
        }

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
///
/// This is the main entry point for error mapping in async code. It extracts
/// the inner `rusqlite::Error` if present, otherwise maps to a generic
/// `QueryFailed` error.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
) -> RepositoryError {
    map_tokio_rusqlite_error_with_id(err, entity_type, "unknown")
}

/// Maps a tokio_rusqlite error with a known key to a RepositoryError.
///
/// Use this variant when the offending key is known at the call site, so an
/// `AlreadyExists` can name it (the duplicate email on user creation).
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let id = id.into();
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, &id)
        }
        tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
