//! sso-auth – Auth-Service
//!
//! Dieses Crate implementiert den fachlichen Kern des SSO-Dienstes:
//! - Passwort-Hashing mit Argon2id
//! - Token-Ausstellung (HS256, signiert mit dem Secret der Applikation)
//! - AuthService (Login, Registrierung, Admin-Abfrage)
//! - Fehler-Taxonomie fuer die Transportschicht

pub mod error;
pub mod password;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult, HashFehler, TokenFehler};
pub use password::{passwort_hashen, passwort_verifizieren, Argon2Hasher, PasswortHasher};
pub use service::AuthService;
pub use token::{lebensdauer_pruefen, token_pruefen, JwtAussteller, TokenAussteller, TokenClaims};
