use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::UserId;

/// Server-assigned, monotonically increasing note identifier.
pub type NoteId = i64;

/// A note owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Trimmed content, 1 to [`MAX_CONTENT_LEN`](super::MAX_CONTENT_LEN) characters.
    pub content: String,
    /// Creation time, bumped on every content mutation.
    pub date: DateTime<Utc>,
    /// Owning user. Every repository operation is scoped by this value.
    pub user_id: UserId,
}
