//! Catalyst Store: SQLite persistence for pitches and subscriptions.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::SqliteStore;
pub use types::*;
