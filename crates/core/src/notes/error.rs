use thiserror::Error;

/// Content validation failures. Always recoverable; reported to the caller
/// with a specific reason and never logged as an incident.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoteError {
    #[error("Note content cannot be empty.")]
    EmptyContent,

    #[error("Note content cannot exceed {max} characters.")]
    ContentTooLong { max: usize },
}
