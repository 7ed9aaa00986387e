//! SSO-Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und fuehrt den
//! gewaehlten Befehl aus.

use anyhow::Result;
use clap::Parser;
use sso_server::{
    cli::{Befehl, Cli},
    config::ServerConfig,
    Server,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let config = ServerConfig::laden(&cli.config)?;

    sso_observability::logging_initialisieren(&config.log_level(), &config.log_format());

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config,
        env = %config.env,
        "SSO-Server wird initialisiert"
    );

    let server = Server::neu(config);
    match cli.befehl() {
        Befehl::Serve => server.starten().await?,
        Befehl::Migrate => {
            server.migrieren().await?;
            tracing::info!("Migrationen abgeschlossen");
        }
        Befehl::AppAdd { name, secret } => {
            let id = server.app_hinzufuegen(&name, &secret).await?;
            println!("{}", id.inner());
        }
    }

    Ok(())
}
