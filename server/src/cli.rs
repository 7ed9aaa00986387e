//! Kommandozeile des SSO-Servers

use clap::{Parser, Subcommand};

/// SSO-Dienst: Login, Registrierung und Admin-Abfrage ueber gRPC
#[derive(Debug, Parser)]
#[command(name = "sso-server", version, about)]
pub struct Cli {
    /// Pfad zur TOML-Konfiguration
    #[arg(
        long,
        short = 'c',
        env = "CONFIG_PATH",
        default_value = "config/local.toml",
        global = true
    )]
    pub config: String,

    #[command(subcommand)]
    pub befehl: Option<Befehl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Befehl {
    /// gRPC-Server starten (Standard)
    Serve,
    /// Datenbank-Migrationen ausfuehren und beenden
    Migrate,
    /// Applikation mit Signatur-Secret registrieren
    AppAdd {
        /// Eindeutiger Name der Applikation
        #[arg(long)]
        name: String,
        /// Secret fuer die Token-Signatur
        #[arg(long, env = "SSO_APP_SECRET", hide_env_values = true)]
        secret: String,
    },
}

impl Cli {
    /// Ohne Unterbefehl wird der Server gestartet
    pub fn befehl(&self) -> Befehl {
        self.befehl.clone().unwrap_or(Befehl::Serve)
    }
}
