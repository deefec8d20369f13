//! Core domain logic for notesync.
//!
//! This crate holds the pure parts of the system: entity types, input
//! validation, password hashing, error taxonomies, and the repository traits
//! the storage backends implement. No I/O happens here.

pub mod auth;
pub mod notes;
pub mod storage;
