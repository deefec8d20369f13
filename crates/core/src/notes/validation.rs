//! Note content validation.
//!
//! Runs before any write reaches the storage layer; invalid content must
//! never be persisted.

use super::NoteError;

/// Maximum note length in characters, counted after trimming.
pub const MAX_CONTENT_LEN: usize = 2000;

/// Trims surrounding whitespace and enforces the 1..=2000 character bound.
///
/// Returns the trimmed content that should be stored.
pub fn validate_content(raw: &str) -> Result<String, NoteError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NoteError::EmptyContent);
    }
    if trimmed.chars().count() > MAX_CONTENT_LEN {
        return Err(NoteError::ContentTooLong {
            max: MAX_CONTENT_LEN,
        });
    }
    Ok(trimmed.to_string())
}
