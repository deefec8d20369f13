//! Storage backends.
//!
//! Implementations of the repository traits from `notesync_core::storage`.

pub mod sqlite;
