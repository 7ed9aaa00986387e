//! sso-server – Bibliotheks-Root
//!
//! Verdrahtet Konfiguration, Datenbank, AuthService und gRPC-Server und
//! stellt den oeffentlichen Einstiegspunkt fuer Tests bereit.

pub mod cli;
pub mod config;

use std::{future::Future, sync::Arc};

use anyhow::{Context, Result};
use config::ServerConfig;
use sso_auth::AuthService;
use sso_core::AppId;
use sso_db::{AppRepository, SqliteDb};
use sso_grpc::GrpcServer;

/// Haelt den Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Datenbankverbindung herstellen (inkl. Migrationen)
    /// 2. AuthService erzeugen
    /// 3. gRPC-Server starten
    /// 4. Auf Ctrl-C / SIGTERM warten, laufende Requests beenden
    pub async fn starten(self) -> Result<()> {
        self.starten_bis(shutdown_signal()).await
    }

    /// Wie [`Server::starten`], aber mit frei waehlbarem Shutdown-Signal
    pub async fn starten_bis<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        tracing::info!(
            env = %self.config.env,
            token_ttl_sekunden = self.config.auth.token_ttl_sekunden,
            "Server startet"
        );

        let db = SqliteDb::oeffnen(&self.config.datenbank_konfig())
            .await
            .context("Datenbank konnte nicht geoeffnet werden")?;

        self.betreiben(db, shutdown).await
    }

    /// Betreibt den gRPC-Server auf einer geoeffneten Datenbank
    ///
    /// Der Pool wird in jedem Fall geschlossen, auch wenn der Server nicht
    /// starten konnte.
    pub async fn betreiben<F>(self, db: SqliteDb, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let ergebnis = self.grpc_betreiben(&db, shutdown).await;
        db.schliessen().await;

        match &ergebnis {
            Ok(()) => tracing::info!("Server beendet"),
            Err(e) => tracing::error!(error = %e, "Server mit Fehler beendet"),
        }
        ergebnis
    }

    async fn grpc_betreiben<F>(&self, db: &SqliteDb, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        let grpc_konfig = self.config.grpc_konfig()?;
        let service = Arc::new(AuthService::neu(Arc::new(db.clone()), self.config.token_ttl()));

        let server = GrpcServer::neu(grpc_konfig);
        let (listener, addr) = server
            .binden()
            .await
            .context("gRPC-Adresse konnte nicht gebunden werden")?;
        tracing::debug!(addr = %addr, "gRPC-Adresse gebunden");

        server.starten(listener, service, shutdown).await?;
        Ok(())
    }

    /// Fuehrt ausstehende Migrationen aus und beendet sich
    pub async fn migrieren(&self) -> Result<()> {
        let db = SqliteDb::oeffnen(&self.config.datenbank_konfig())
            .await
            .context("Migration fehlgeschlagen")?;
        db.schliessen().await;
        Ok(())
    }

    /// Registriert eine Applikation (Signatur-Domaene fuer Tokens)
    pub async fn app_hinzufuegen(&self, name: &str, secret: &str) -> Result<AppId> {
        let db = SqliteDb::oeffnen(&self.config.datenbank_konfig())
            .await
            .context("Datenbank konnte nicht geoeffnet werden")?;
        let ergebnis = db.create_app(name, secret.as_bytes()).await;
        db.schliessen().await;
        let id = ergebnis
            .with_context(|| format!("Applikation '{name}' konnte nicht angelegt werden"))?;

        tracing::info!(app_id = %id, name = %name, "Applikation registriert");
        Ok(id)
    }
}

/// Wartet auf Ctrl-C oder (unter Unix) SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C-Handler konnte nicht installiert werden");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM-Handler konnte nicht installiert werden");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl-C empfangen, Server wird beendet"),
        _ = terminate => tracing::info!("SIGTERM empfangen, Server wird beendet"),
    }
}
