//! sso-db – Storage-Gateway
//!
//! Dieses Crate stellt die Repository-Traits bereit, ueber die der
//! Auth-Service Benutzer und Applikationen laedt und speichert, sowie die
//! SQLite-Implementierung dieser Traits.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use models::{AppRecord, BenutzerRecord};
pub use repository::{AppRepository, DatabaseConfig, DbResult, StorageGateway, UserRepository};
pub use sqlite::SqliteDb;
