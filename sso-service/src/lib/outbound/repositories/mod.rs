pub mod sqlite;

pub use sqlite::SqliteDirectory;
