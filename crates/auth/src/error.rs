//! Fehlertypen fuer den Auth-Service
//!
//! `AuthError` ist die geschlossene Menge fachlicher Fehlerarten, auf die
//! die Transportschicht 1:1 Statuscodes abbildet. Fehler der Komponenten
//! (Hasher, Token-Aussteller, Datenbank) werden im Service an der Stelle
//! ihres Auftretens geloggt und auf `AuthError::Intern` reduziert.

use thiserror::Error;

/// Fachliche Fehlerarten des Auth-Service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AuthError {
    /// E-Mail unbekannt oder Passwort falsch (bewusst nicht unterscheidbar)
    #[error("Ungueltige Anmeldedaten")]
    UngueltigeAnmeldedaten,

    #[error("Benutzer existiert bereits")]
    BenutzerExistiert,

    #[error("Applikation nicht gefunden")]
    AppNichtGefunden,

    #[error("Benutzer nicht gefunden")]
    NichtGefunden,

    #[error("Interner Fehler")]
    Intern,
}

impl AuthError {
    /// Stabiler, maschinenlesbarer Code (fuer Logs)
    pub fn code(&self) -> &'static str {
        match self {
            Self::UngueltigeAnmeldedaten => "invalid_credentials",
            Self::BenutzerExistiert => "user_exists",
            Self::AppNichtGefunden => "app_not_found",
            Self::NichtGefunden => "not_found",
            Self::Intern => "internal",
        }
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;

/// Fehler des Passwort-Hashers
#[derive(Debug, Error)]
pub enum HashFehler {
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    Hashing(String),

    #[error("Ungueltiges Hash-Format: {0}")]
    Format(String),
}

/// Fehler beim Ausstellen oder Pruefen eines Tokens
#[derive(Debug, Error)]
pub enum TokenFehler {
    #[error("Token-Signatur fehlgeschlagen: {0}")]
    Signatur(#[source] jsonwebtoken::errors::Error),

    #[error("Token ungueltig: {0}")]
    Ungueltig(#[source] jsonwebtoken::errors::Error),

    #[error("Applikation hat kein Signatur-Secret")]
    LeeresSecret,

    #[error("Token-Lebensdauer ausserhalb des gueltigen Bereichs")]
    LebensdauerUngueltig,
}
