//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable:
//! - `SSO_LOG_LEVEL`: Log-Level oder EnvFilter-Direktiven, ueberschreibt die Konfiguration
//! - `SSO_LOG_FORMAT`: Format (text/json), ueberschreibt die Konfiguration

use std::str::FromStr;

use tracing_subscriber::{fmt, EnvFilter};

/// Betriebsumgebung; bestimmt die Standardwerte fuer Level und Format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogUmgebung {
    /// Entwicklerrechner: lesbarer Text, debug
    Local,
    /// Testsysteme: JSON, debug
    Dev,
    /// Produktion: JSON, info
    Prod,
}

impl LogUmgebung {
    pub fn standard_level(&self) -> &'static str {
        match self {
            Self::Local | Self::Dev => "debug",
            Self::Prod => "info",
        }
    }

    pub fn standard_format(&self) -> &'static str {
        match self {
            Self::Local => "text",
            Self::Dev | Self::Prod => "json",
        }
    }
}

impl FromStr for LogUmgebung {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            other => Err(format!("Unbekannte Umgebung: {other}")),
        }
    }
}

/// Initialisiert das Logging-System.
///
/// `SSO_LOG_LEVEL` und `SSO_LOG_FORMAT` haben Vorrang vor den Argumenten.
pub fn logging_initialisieren(level: &str, format: &str) {
    let filter = EnvFilter::try_from_env("SSO_LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let format_env = std::env::var("SSO_LOG_FORMAT").unwrap_or_else(|_| format.to_string());

    match format_env.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .with_current_span(true)
                .init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Validiert ob ein Log-Level-String gueltig ist.
pub fn log_level_gueltig(level: &str) -> bool {
    matches!(level, "trace" | "debug" | "info" | "warn" | "error")
}

/// Validiert ob ein Log-Format-String gueltig ist.
pub fn log_format_gueltig(format: &str) -> bool {
    matches!(format, "text" | "json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_werte() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(log_level_gueltig(level));
        }
        assert!(!log_level_gueltig("verbose"));
        assert!(!log_level_gueltig("INFO")); // Gross-/Kleinschreibung
        assert!(!log_level_gueltig(""));
    }

    #[test]
    fn log_format_werte() {
        assert!(log_format_gueltig("text"));
        assert!(log_format_gueltig("json"));
        assert!(!log_format_gueltig("xml"));
        assert!(!log_format_gueltig("JSON"));
    }

    #[test]
    fn umgebung_standardwerte() {
        assert_eq!(LogUmgebung::Local.standard_format(), "text");
        assert_eq!(LogUmgebung::Local.standard_level(), "debug");
        assert_eq!(LogUmgebung::Dev.standard_format(), "json");
        assert_eq!(LogUmgebung::Prod.standard_level(), "info");
    }

    #[test]
    fn umgebung_parsen() {
        assert_eq!("prod".parse::<LogUmgebung>(), Ok(LogUmgebung::Prod));
        assert!("staging".parse::<LogUmgebung>().is_err());
    }
}
