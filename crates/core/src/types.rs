//! Gemeinsame Identifikationstypen
//!
//! IDs werden von der Datenbank vergeben (AUTOINCREMENT) und sind daher
//! `i64`. Das Newtype-Pattern verhindert, dass eine App-ID versehentlich
//! als Benutzer-ID verwendet wird.

use serde::{Deserialize, Serialize};

/// Eindeutige Benutzer-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Gibt den inneren Wert zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(wert: i64) -> Self {
        Self(wert)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Eindeutige Applikations-ID (Signatur-Domaene eines Tokens)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub i64);

impl AppId {
    /// Gibt den inneren Wert zurueck
    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AppId {
    fn from(wert: i64) -> Self {
        Self(wert)
    }
}

impl std::fmt::Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "app:{}", self.0)
    }
}
