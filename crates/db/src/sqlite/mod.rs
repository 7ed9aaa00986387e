//! SQLite-Backend-Implementierungen fuer alle Repository-Traits

pub mod apps;
pub mod pool;
pub mod users;

pub use pool::SqliteDb;
