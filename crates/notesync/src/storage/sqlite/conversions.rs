//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use rusqlite::Row;

use notesync_core::auth::User;
use notesync_core::notes::Note;

/// Convert a SQLite row to a User.
///
/// Columns are addressed by name so reordering a SELECT cannot silently
/// shuffle fields.
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
    })
}

/// Convert a SQLite row to a Note.
pub fn row_to_note(row: &Row) -> rusqlite::Result<Note> {
    let date: String = row.get("date")?;

    Ok(Note {
        id: row.get("id")?,
        content: row.get("content")?,
        date: parse_datetime(&date)?,
        user_id: row.get("user_id")?,
    })
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Fixed-width RFC 3339 with microseconds, so lexicographic ordering of the
/// stored text matches chronological ordering and `ORDER BY date` works.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// The current time at the precision the store keeps.
///
/// Truncated to microseconds so a timestamp written and read back compares
/// equal to the in-memory value it came from.
pub fn now() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(now.nanosecond() / 1_000 * 1_000)
        .unwrap_or(now)
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}
