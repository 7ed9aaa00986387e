//! Token-Ausstellung fuer erfolgreiche Logins
//!
//! Ein Token ist ein HS256-JWT, signiert mit dem Secret der Applikation,
//! fuer die es ausgestellt wurde. Ein Token fuer Applikation A laesst sich
//! mit dem Secret von Applikation B nicht verifizieren. Tokens werden nicht
//! gespeichert und koennen nicht widerrufen werden.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use sso_db::models::{AppRecord, BenutzerRecord};

use crate::error::TokenFehler;

/// Nutzlast eines Session-Tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Benutzer-ID (Subject)
    pub uid: i64,
    pub email: String,
    pub app_id: i64,
    /// Ausgestellt am (Unix-Sekunden)
    pub iat: i64,
    /// Laeuft ab am (Unix-Sekunden), immer `iat + ttl`
    pub exp: i64,
}

/// Stellt signierte Tokens fuer ein Benutzer/Applikations-Paar aus
pub trait TokenAussteller: Send + Sync {
    fn ausstellen(
        &self,
        benutzer: &BenutzerRecord,
        app: &AppRecord,
        ttl: Duration,
    ) -> Result<String, TokenFehler>;
}

/// Produktiver Aussteller: JWT mit HMAC-SHA256
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAussteller;

impl TokenAussteller for JwtAussteller {
    fn ausstellen(
        &self,
        benutzer: &BenutzerRecord,
        app: &AppRecord,
        ttl: Duration,
    ) -> Result<String, TokenFehler> {
        if app.secret.is_empty() {
            return Err(TokenFehler::LeeresSecret);
        }

        let jetzt = Utc::now();
        let ablauf = ablauf_berechnen(jetzt, ttl)?;

        let claims = TokenClaims {
            uid: benutzer.id.inner(),
            email: benutzer.email.clone(),
            app_id: app.id.inner(),
            iat: jetzt.timestamp(),
            exp: ablauf.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&app.secret),
        )
        .map_err(TokenFehler::Signatur)
    }
}

/// Prueft, ob sich mit dieser Lebensdauer ab jetzt ein Ablaufzeitpunkt
/// bilden laesst
pub fn lebensdauer_pruefen(ttl: Duration) -> Result<(), TokenFehler> {
    ablauf_berechnen(Utc::now(), ttl).map(|_| ())
}

fn ablauf_berechnen(jetzt: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, TokenFehler> {
    let ttl = chrono::Duration::from_std(ttl).map_err(|_| TokenFehler::LebensdauerUngueltig)?;
    jetzt
        .checked_add_signed(ttl)
        .ok_or(TokenFehler::LebensdauerUngueltig)
}

/// Dekodiert ein Token und prueft Signatur und Ablaufzeit
///
/// Fuer nachgelagerte Dienste, die das Secret ihrer Applikation kennen.
pub fn token_pruefen(token: &str, secret: &[u8]) -> Result<TokenClaims, TokenFehler> {
    if secret.is_empty() {
        return Err(TokenFehler::LeeresSecret);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|daten| daten.claims)
        .map_err(TokenFehler::Ungueltig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sso_core::{AppId, UserId};

    fn benutzer() -> BenutzerRecord {
        BenutzerRecord {
            id: UserId(2),
            email: "rostyk@example.com".into(),
            pass_hash: b"irrelevant".to_vec(),
            is_admin: false,
        }
    }

    fn app(id: i64, secret: &[u8]) -> AppRecord {
        AppRecord {
            id: AppId(id),
            name: format!("app-{id}"),
            secret: secret.to_vec(),
        }
    }

    #[test]
    fn token_enthaelt_claims() {
        let ttl = Duration::from_secs(120);
        let vorher = Utc::now().timestamp();
        let token = JwtAussteller
            .ausstellen(&benutzer(), &app(3, b"test-secret"), ttl)
            .expect("Token ausstellen fehlgeschlagen");
        let nachher = Utc::now().timestamp();

        let claims = token_pruefen(&token, b"test-secret").expect("Token muss gueltig sein");
        assert_eq!(claims.uid, 2);
        assert_eq!(claims.email, "rostyk@example.com");
        assert_eq!(claims.app_id, 3);
        assert!(claims.iat >= vorher && claims.iat <= nachher);
        assert_eq!(claims.exp, claims.iat + 120);
    }

    #[test]
    fn fremdes_secret_wird_abgelehnt() {
        let token = JwtAussteller
            .ausstellen(&benutzer(), &app(1, b"secret-a"), Duration::from_secs(60))
            .unwrap();

        let ergebnis = token_pruefen(&token, b"secret-b");
        assert!(matches!(ergebnis, Err(TokenFehler::Ungueltig(_))));
    }

    #[test]
    fn abgelaufenes_token_wird_abgelehnt() {
        let token = JwtAussteller
            .ausstellen(&benutzer(), &app(1, b"secret"), Duration::ZERO)
            .unwrap();

        std::thread::sleep(Duration::from_millis(1100));
        assert!(token_pruefen(&token, b"secret").is_err());
    }

    #[test]
    fn leeres_secret_wird_abgelehnt() {
        let ergebnis = JwtAussteller.ausstellen(&benutzer(), &app(1, b""), Duration::from_secs(60));
        assert!(matches!(ergebnis, Err(TokenFehler::LeeresSecret)));
    }

    #[test]
    fn riesige_lebensdauer_wird_abgelehnt() {
        let ergebnis =
            JwtAussteller.ausstellen(&benutzer(), &app(1, b"secret"), Duration::from_secs(u64::MAX));
        assert!(matches!(ergebnis, Err(TokenFehler::LebensdauerUngueltig)));
    }

    #[test]
    fn lebensdauer_grenzen() {
        assert!(lebensdauer_pruefen(Duration::from_secs(3600)).is_ok());
        assert!(lebensdauer_pruefen(Duration::from_secs(10 * 365 * 24 * 3600)).is_ok());
        assert!(matches!(
            lebensdauer_pruefen(Duration::from_secs(1_000_000_000_000_000)),
            Err(TokenFehler::LebensdauerUngueltig)
        ));
        assert!(lebensdauer_pruefen(Duration::from_secs(u64::MAX)).is_err());
    }
}
