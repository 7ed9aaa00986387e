//! Datenbankmodelle
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank und sind
//! gleichzeitig die Domain-Entities des Auth-Service (User, Application).

use serde::Serialize;
use sso_core::{AppId, UserId};

// ---------------------------------------------------------------------------
// Benutzer
// ---------------------------------------------------------------------------

/// Benutzer-Datensatz aus der Datenbank
///
/// `pass_hash` ist ein opaker Byte-String (PHC-Format) und wird nur vom
/// Passwort-Hasher interpretiert.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct BenutzerRecord {
    pub id: UserId,
    pub email: String,
    #[serde(skip)]
    pub pass_hash: Vec<u8>,
    pub is_admin: bool,
}

impl std::fmt::Debug for BenutzerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenutzerRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("pass_hash", &"<redacted>")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Applikationen
// ---------------------------------------------------------------------------

/// Applikations-Datensatz aus der Datenbank
///
/// `secret` ist der HMAC-Schluessel fuer Tokens dieser Applikation. Er wird
/// weder geloggt noch serialisiert.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AppRecord {
    pub id: AppId,
    pub name: String,
    #[serde(skip)]
    pub secret: Vec<u8>,
}

impl std::fmt::Debug for AppRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"<redacted>")
            .finish()
    }
}
