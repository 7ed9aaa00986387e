//! Fehlertypen fuer den SSO-Prozess
//!
//! Prozessweiter Fehler-Enum fuer Start, Konfiguration und Verdrahtung.
//! Die Fachfehler des Auth-Service liegen in `sso-auth` und verlassen den
//! Service nie mit Details aus tieferen Schichten.

use thiserror::Error;

/// Globaler Result-Alias
pub type Result<T> = std::result::Result<T, SsoError>;

/// Fehler beim Betrieb des SSO-Prozesses
#[derive(Debug, Error)]
pub enum SsoError {
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl SsoError {
    /// Erstellt einen Konfigurationsfehler aus einer beliebigen Nachricht
    pub fn konfiguration(msg: impl Into<String>) -> Self {
        Self::Konfiguration(msg.into())
    }
}
