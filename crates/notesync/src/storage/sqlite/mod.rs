//! SQLite storage backend.

mod conversions;
mod error;
mod path;
mod repository;
mod schema;

pub use path::StorePath;
pub use repository::SqliteStore;
