//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt den Auth-Service von der konkreten
//! Datenbank-Implementierung. "Nicht gefunden" ist ein Fehler
//! (`DbError::NichtGefunden`), kein `Option`, damit der Aufrufer genau an
//! einer Stelle klassifiziert.

use async_trait::async_trait;
use sso_core::{AppId, UserId};

use crate::error::DbError;
use crate::models::{AppRecord, BenutzerRecord};

/// Result-Alias fuer Repository-Operationen
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://storage/sso.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://storage/sso.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Benutzer-Datenzugriffe
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Legt einen Benutzer an und gibt die vergebene ID zurueck
    ///
    /// `DbError::Eindeutigkeit` wenn die E-Mail bereits existiert.
    async fn save_user(&self, email: &str, pass_hash: &[u8]) -> DbResult<UserId>;

    /// Laedt einen Benutzer anhand seiner E-Mail
    async fn find_by_email(&self, email: &str) -> DbResult<BenutzerRecord>;

    /// Liest das Admin-Flag eines Benutzers
    async fn is_admin(&self, id: UserId) -> DbResult<bool>;

    /// Setzt das Admin-Flag eines Benutzers
    async fn set_admin(&self, id: UserId, admin: bool) -> DbResult<()>;
}

/// Repository fuer Applikations-Datenzugriffe
#[async_trait]
pub trait AppRepository: Send + Sync {
    /// Laedt eine Applikation anhand ihrer ID
    async fn find_app(&self, id: AppId) -> DbResult<AppRecord>;

    /// Registriert eine neue Applikation mit ihrem Signatur-Secret
    async fn create_app(&self, name: &str, secret: &[u8]) -> DbResult<AppId>;
}

/// Vollstaendiges Storage-Gateway des Auth-Service: Benutzer und Applikationen
pub trait StorageGateway: UserRepository + AppRepository {}

impl<T: UserRepository + AppRepository> StorageGateway for T {}
