//! Passwort-Hashing mit Argon2id
//!
//! Stellt sichere Passwort-Hashfunktionen mit Argon2id bereit.
//! Argon2id ist der empfohlene Algorithmus gemaess OWASP-Richtlinien.
//! Der Hash wird als PHC-String erzeugt und als Bytes gespeichert.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::HashFehler;

/// Einweg-Hashing von Passwoertern
///
/// Implementierungen muessen reine Funktionen ihrer Eingaben sein und
/// gleichzeitig aus mehreren Requests aufgerufen werden koennen.
pub trait PasswortHasher: Send + Sync {
    /// Hasht ein Passwort mit zufaelligem Salt
    fn hash(&self, passwort: &str) -> Result<Vec<u8>, HashFehler>;

    /// Prueft ein Passwort gegen einen gespeicherten Hash
    ///
    /// `Ok(false)` bei falschem Passwort, `Err` nur bei defektem Hash.
    fn verify(&self, hash: &[u8], passwort: &str) -> Result<bool, HashFehler>;
}

/// Produktiver Hasher mit festen Argon2id-Parametern
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswortHasher for Argon2Hasher {
    fn hash(&self, passwort: &str) -> Result<Vec<u8>, HashFehler> {
        passwort_hashen(passwort).map(String::into_bytes)
    }

    fn verify(&self, hash: &[u8], passwort: &str) -> Result<bool, HashFehler> {
        let hash = std::str::from_utf8(hash)
            .map_err(|e| HashFehler::Format(format!("Hash ist kein UTF-8: {e}")))?;
        passwort_verifizieren(passwort, hash)
    }
}

/// Argon2id-Parameter fuer sicheres Passwort-Hashing
///
/// Werte gemaess OWASP-Empfehlungen (Stand 2024):
/// - Speicher: 64 MiB
/// - Iterationen: 3
/// - Parallelismus: 1
fn argon2_instanz() -> Result<Argon2<'static>, HashFehler> {
    let params = Params::new(
        64 * 1024, // m_cost: 64 MiB
        3,         // t_cost: 3 Iterationen
        1,         // p_cost: 1 Thread
        None,      // output_len: Standard (32 Bytes)
    )
    .map_err(|e| HashFehler::Hashing(format!("Argon2-Parameter ungueltig: {e}")))?;

    Ok(Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params))
}

/// Hasht ein Passwort mit Argon2id und einem zufaelligen Salt
///
/// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt).
pub fn passwort_hashen(passwort: &str) -> Result<String, HashFehler> {
    let salt = SaltString::generate(&mut OsRng);

    argon2_instanz()?
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HashFehler::Hashing(e.to_string()))
}

/// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
///
/// Gibt `true` zurueck wenn das Passwort korrekt ist.
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> Result<bool, HashFehler> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| HashFehler::Format(e.to_string()))?;

    match argon2_instanz()?.verify_password(passwort.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(HashFehler::Hashing(e.to_string())),
    }
}

/// Gueltiger Argon2id-Hash mit denselben Parametern wie [`argon2_instanz`],
/// zu dem kein Passwort passt.
///
/// Wird bei unbekannter E-Mail verifiziert, damit der Login gleich lange
/// dauert wie bei falschem Passwort.
pub const PLATZHALTER_HASH: &str = "$argon2id$v=19$m=65536,t=3,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
