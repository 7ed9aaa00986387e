//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist.

use std::{net::SocketAddr, time::Duration};

use serde::{Deserialize, Serialize};
use sso_core::SsoError;
use sso_db::DatabaseConfig;
use sso_grpc::GrpcServerKonfig;
use sso_observability::{
    logging::{log_format_gueltig, log_level_gueltig},
    LogUmgebung,
};

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Umgebung: "local", "dev" oder "prod"
    pub env: String,
    /// gRPC-Einstellungen
    pub grpc: GrpcEinstellungen,
    /// Token-Einstellungen
    pub auth: AuthEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            env: "local".into(),
            grpc: GrpcEinstellungen::default(),
            auth: AuthEinstellungen::default(),
            datenbank: DatenbankEinstellungen::default(),
            logging: LoggingEinstellungen::default(),
        }
    }
}

/// gRPC-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcEinstellungen {
    /// Bind-Adresse des gRPC-Servers
    pub bind_adresse: String,
    /// Port des gRPC-Servers
    pub port: u16,
    /// Zeitlimit pro Request in Sekunden
    pub timeout_sekunden: u64,
}

impl Default for GrpcEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 44044,
            timeout_sekunden: 10,
        }
    }
}

/// Token-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// Lebensdauer ausgestellter Tokens in Sekunden
    pub token_ttl_sekunden: u64,
}

impl Default for AuthEinstellungen {
    fn default() -> Self {
        Self {
            token_ttl_sekunden: 3600,
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        let standard = DatabaseConfig::default();
        Self {
            url: standard.url,
            max_verbindungen: standard.max_verbindungen,
            wal: standard.sqlite_wal,
        }
    }
}

/// Logging-Einstellungen; leer = Standard der Umgebung
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: Option<String>,
    /// Format: "json" oder "text"
    pub format: Option<String>,
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        let config = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => toml::from_str::<Self>(&inhalt)
                .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Logging ist hier noch nicht initialisiert
                eprintln!("Konfigurationsdatei '{pfad}' nicht gefunden, verwende Standardwerte");
                Self::default()
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
                ))
            }
        };

        config.validieren()?;
        Ok(config)
    }

    /// Prueft Werte, die serde nicht abfangen kann
    pub fn validieren(&self) -> sso_core::Result<()> {
        self.umgebung()?;

        if self.auth.token_ttl_sekunden == 0 {
            return Err(SsoError::konfiguration("auth.token_ttl_sekunden darf nicht 0 sein"));
        }
        if let Err(e) = sso_auth::lebensdauer_pruefen(self.token_ttl()) {
            return Err(SsoError::konfiguration(format!(
                "auth.token_ttl_sekunden = {}: {e}",
                self.auth.token_ttl_sekunden
            )));
        }
        if self.grpc.port == 0 {
            return Err(SsoError::konfiguration("grpc.port darf nicht 0 sein"));
        }
        if self.grpc.timeout_sekunden == 0 {
            return Err(SsoError::konfiguration("grpc.timeout_sekunden darf nicht 0 sein"));
        }
        if self.datenbank.max_verbindungen == 0 {
            return Err(SsoError::konfiguration(
                "datenbank.max_verbindungen darf nicht 0 sein",
            ));
        }
        if let Some(level) = &self.logging.level {
            if !log_level_gueltig(level) {
                return Err(SsoError::konfiguration(format!(
                    "Ungueltiges Log-Level: {level}"
                )));
            }
        }
        if let Some(format) = &self.logging.format {
            if !log_format_gueltig(format) {
                return Err(SsoError::konfiguration(format!(
                    "Ungueltiges Log-Format: {format}"
                )));
            }
        }
        self.grpc_bind_adresse()?;
        Ok(())
    }

    /// Umgebung als Enum
    pub fn umgebung(&self) -> sso_core::Result<LogUmgebung> {
        self.env.parse().map_err(SsoError::Konfiguration)
    }

    /// Effektives Log-Level (Konfiguration oder Standard der Umgebung)
    pub fn log_level(&self) -> String {
        self.logging.level.clone().unwrap_or_else(|| {
            self.umgebung()
                .map(|u| u.standard_level())
                .unwrap_or("info")
                .to_string()
        })
    }

    /// Effektives Log-Format (Konfiguration oder Standard der Umgebung)
    pub fn log_format(&self) -> String {
        self.logging.format.clone().unwrap_or_else(|| {
            self.umgebung()
                .map(|u| u.standard_format())
                .unwrap_or("text")
                .to_string()
        })
    }

    /// Lebensdauer ausgestellter Tokens
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.auth.token_ttl_sekunden)
    }

    /// Gibt die Bind-Adresse fuer den gRPC-Server zurueck
    pub fn grpc_bind_adresse(&self) -> sso_core::Result<SocketAddr> {
        format!("{}:{}", self.grpc.bind_adresse, self.grpc.port)
            .parse()
            .map_err(|e| {
                SsoError::konfiguration(format!(
                    "Ungueltige gRPC-Adresse '{}': {e}",
                    self.grpc.bind_adresse
                ))
            })
    }

    /// Konfiguration des gRPC-Servers
    pub fn grpc_konfig(&self) -> sso_core::Result<GrpcServerKonfig> {
        Ok(GrpcServerKonfig {
            bind_addr: self.grpc_bind_adresse()?,
            timeout: Duration::from_secs(self.grpc.timeout_sekunden),
        })
    }

    /// Konfiguration der Datenbankverbindung
    pub fn datenbank_konfig(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.wal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        cfg.validieren().expect("Standardkonfiguration muss gueltig sein");
        assert_eq!(cfg.grpc.port, 44044);
        assert_eq!(cfg.token_ttl(), Duration::from_secs(3600));
        assert_eq!(cfg.grpc_bind_adresse().unwrap().to_string(), "0.0.0.0:44044");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            env = "prod"

            [grpc]
            port = 50051

            [auth]
            token_ttl_sekunden = 900
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        cfg.validieren().unwrap();
        assert_eq!(cfg.grpc.port, 50051);
        assert_eq!(cfg.token_ttl(), Duration::from_secs(900));
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.grpc.timeout_sekunden, 10);
        assert_eq!(cfg.log_format(), "json");
        assert_eq!(cfg.log_level(), "info");
    }

    #[test]
    fn logging_ueberschreibt_umgebung() {
        let toml = r#"
            env = "prod"
            [logging]
            level = "debug"
            format = "text"
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.log_format(), "text");
    }

    #[test]
    fn ungueltige_werte_werden_abgelehnt() {
        let mut cfg = ServerConfig::default();
        cfg.auth.token_ttl_sekunden = 0;
        assert!(cfg.validieren().is_err());

        let mut cfg = ServerConfig::default();
        cfg.auth.token_ttl_sekunden = 1_000_000_000_000_000;
        assert!(matches!(cfg.validieren(), Err(SsoError::Konfiguration(_))));

        let mut cfg = ServerConfig::default();
        cfg.env = "staging".into();
        assert!(matches!(cfg.validieren(), Err(SsoError::Konfiguration(_))));

        let mut cfg = ServerConfig::default();
        cfg.grpc.bind_adresse = "kein host".into();
        assert!(cfg.validieren().is_err());

        let mut cfg = ServerConfig::default();
        cfg.logging.format = Some("xml".into());
        assert!(cfg.validieren().is_err());
    }

    #[test]
    fn fehlende_datei_liefert_standard() {
        let cfg = ServerConfig::laden("/nicht/vorhanden/sso.toml").unwrap();
        assert_eq!(cfg.env, "local");
    }
}
