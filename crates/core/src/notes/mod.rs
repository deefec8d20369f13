//! Note entity and content rules.

mod error;
mod types;
mod validation;

pub use error::NoteError;
pub use types::{Note, NoteId};
pub use validation::{validate_content, MAX_CONTENT_LEN};
