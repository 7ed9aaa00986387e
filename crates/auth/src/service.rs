//! Auth-Service fuer den SSO-Dienst
//!
//! Zentraler Service fuer Login, Registrierung und Admin-Abfrage.
//! Der Service haelt keinen veraenderlichen Zustand; Storage, Hasher und
//! Token-Aussteller werden beim Erzeugen injiziert. Fehler der Komponenten
//! werden hier geloggt und auf die fachlichen Fehlerarten abgebildet,
//! Details verlassen den Service nicht.

use std::{sync::Arc, time::Duration};

use sso_core::{AppId, UserId};
use sso_db::{DbError, StorageGateway};

use crate::{
    error::{AuthError, AuthResult, HashFehler},
    password::{Argon2Hasher, PasswortHasher, PLATZHALTER_HASH},
    token::{JwtAussteller, TokenAussteller},
};

/// Auth-Service – zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct AuthService<S, H = Argon2Hasher, T = JwtAussteller> {
    storage: Arc<S>,
    hasher: Arc<H>,
    aussteller: T,
    token_ttl: Duration,
}

impl<S: StorageGateway> AuthService<S> {
    /// Erstellt einen AuthService mit Argon2id-Hasher und JWT-Aussteller
    pub fn neu(storage: Arc<S>, token_ttl: Duration) -> Self {
        Self::mit_komponenten(storage, Arc::new(Argon2Hasher), JwtAussteller, token_ttl)
    }
}

impl<S, H, T> AuthService<S, H, T>
where
    S: StorageGateway,
    H: PasswortHasher + 'static,
    T: TokenAussteller,
{
    /// Erstellt einen AuthService mit frei gewaehlten Komponenten
    pub fn mit_komponenten(storage: Arc<S>, hasher: Arc<H>, aussteller: T, token_ttl: Duration) -> Self {
        Self {
            storage,
            hasher,
            aussteller,
            token_ttl,
        }
    }

    /// Meldet einen Benutzer fuer eine Applikation an und gibt das Token zurueck
    ///
    /// Unbekannte E-Mail und falsches Passwort liefern beide
    /// `UngueltigeAnmeldedaten`. Die Applikation wird erst nach erfolgreicher
    /// Passwortpruefung geladen.
    #[tracing::instrument(name = "auth.anmelden", skip_all, fields(email = %email, app_id = %app_id))]
    pub async fn anmelden(&self, email: &str, passwort: &str, app_id: AppId) -> AuthResult<String> {
        let benutzer = match self.storage.find_by_email(email).await {
            Ok(benutzer) => benutzer,
            Err(DbError::NichtGefunden(_)) => {
                // Gleicher Aufwand wie bei falschem Passwort, Ergebnis egal
                let _ = self
                    .verifizieren(PLATZHALTER_HASH.as_bytes().to_vec(), passwort)
                    .await;
                tracing::warn!("Login fuer unbekannte E-Mail");
                return Err(AuthError::UngueltigeAnmeldedaten);
            }
            Err(e) => {
                tracing::error!(error = %e, "Benutzer konnte nicht geladen werden");
                return Err(AuthError::Intern);
            }
        };

        let korrekt = self
            .verifizieren(benutzer.pass_hash.clone(), passwort)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_id = %benutzer.id, "Passwortpruefung fehlgeschlagen");
                AuthError::Intern
            })?;
        if !korrekt {
            tracing::warn!(user_id = %benutzer.id, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let app = match self.storage.find_app(app_id).await {
            Ok(app) => app,
            Err(DbError::NichtGefunden(_)) => {
                tracing::warn!("Applikation existiert nicht");
                return Err(AuthError::AppNichtGefunden);
            }
            Err(e) => {
                tracing::error!(error = %e, "Applikation konnte nicht geladen werden");
                return Err(AuthError::Intern);
            }
        };

        let token = self
            .aussteller
            .ausstellen(&benutzer, &app, self.token_ttl)
            .map_err(|e| {
                tracing::error!(error = %e, "Token konnte nicht ausgestellt werden");
                AuthError::Intern
            })?;

        tracing::info!(user_id = %benutzer.id, "Benutzer angemeldet");
        Ok(token)
    }

    /// Registriert einen neuen Benutzer und gibt dessen ID zurueck
    #[tracing::instrument(name = "auth.registrieren", skip_all, fields(email = %email))]
    pub async fn registrieren(&self, email: &str, passwort: &str) -> AuthResult<UserId> {
        let hash = self.hashen(passwort).await.map_err(|e| {
            tracing::error!(error = %e, "Passwort konnte nicht gehasht werden");
            AuthError::Intern
        })?;

        let user_id = match self.storage.save_user(email, &hash).await {
            Ok(id) => id,
            Err(e) if e.ist_eindeutigkeit() => {
                tracing::warn!("E-Mail bereits registriert");
                return Err(AuthError::BenutzerExistiert);
            }
            Err(e) => {
                tracing::error!(error = %e, "Benutzer konnte nicht gespeichert werden");
                return Err(AuthError::Intern);
            }
        };

        tracing::info!(user_id = %user_id, "Neuer Benutzer registriert");
        Ok(user_id)
    }

    /// Gibt zurueck ob der Benutzer Admin-Rechte hat
    #[tracing::instrument(name = "auth.ist_admin", skip_all, fields(user_id = %user_id))]
    pub async fn ist_admin(&self, user_id: UserId) -> AuthResult<bool> {
        match self.storage.is_admin(user_id).await {
            Ok(is_admin) => {
                tracing::debug!(is_admin, "Admin-Status geprueft");
                Ok(is_admin)
            }
            Err(DbError::NichtGefunden(_)) => {
                tracing::warn!("Benutzer existiert nicht");
                Err(AuthError::NichtGefunden)
            }
            Err(e) => {
                tracing::error!(error = %e, "Admin-Status konnte nicht gelesen werden");
                Err(AuthError::Intern)
            }
        }
    }

    // Argon2 ist CPU-gebunden und laeuft auf dem Blocking-Pool von tokio.

    async fn hashen(&self, passwort: &str) -> Result<Vec<u8>, HashFehler> {
        let hasher = Arc::clone(&self.hasher);
        let passwort = passwort.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&passwort))
            .await
            .map_err(|e| HashFehler::Hashing(format!("Hash-Task abgebrochen: {e}")))?
    }

    async fn verifizieren(&self, hash: Vec<u8>, passwort: &str) -> Result<bool, HashFehler> {
        let hasher = Arc::clone(&self.hasher);
        let passwort = passwort.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&hash, &passwort))
            .await
            .map_err(|e| HashFehler::Hashing(format!("Verify-Task abgebrochen: {e}")))?
    }
}
