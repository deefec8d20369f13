//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite store,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
///
/// Indexes are intentionally NOT part of this batch: `idx_notes_user_id`
/// cannot be created on a legacy store until the migration in
/// [`super::repository::SqliteStore`] has added the `user_id` column.
pub const CREATE_TABLES: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

-- Notes table
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    date TEXT NOT NULL,
    user_id INTEGER REFERENCES users(id)
);
"#;

/// SQL statement to create all indexes. Applied after migrations.
pub const CREATE_INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_notes_user_id ON notes(user_id);
CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#;

// Migration queries
pub const TABLE_INFO_NOTES: &str = "PRAGMA table_info(notes)";

pub const ADD_NOTES_OWNER_COLUMN: &str = r#"
ALTER TABLE notes ADD COLUMN user_id INTEGER REFERENCES users(id)
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (email, password_hash)
VALUES (?1, ?2)
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, email, password_hash
FROM users
WHERE email = ?1
"#;

// Note queries
pub const INSERT_NOTE: &str = r#"
INSERT INTO notes (content, date, user_id)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_NOTE_OWNED: &str = r#"
SELECT id, content, date, user_id
FROM notes
WHERE id = ?1 AND user_id = ?2
"#;

pub const SELECT_NOTES_FOR_OWNER: &str = r#"
SELECT id, content, date, user_id
FROM notes
WHERE user_id = ?1
ORDER BY date DESC, id DESC
"#;

pub const SELECT_NOTES_FOR_OWNER_MATCHING: &str = r#"
SELECT id, content, date, user_id
FROM notes
WHERE user_id = ?1 AND LOWER(content) LIKE ?2
ORDER BY date DESC, id DESC
"#;

pub const UPDATE_NOTE_OWNED: &str = r#"
UPDATE notes
SET content = ?3, date = ?4
WHERE id = ?1 AND user_id = ?2
"#;

pub const DELETE_NOTE_OWNED: &str = r#"
DELETE FROM notes
WHERE id = ?1 AND user_id = ?2
"#;
