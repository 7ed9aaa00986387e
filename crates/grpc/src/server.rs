//! gRPC-Server fuer den SSO-Dienst

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use tokio::net::TcpListener;
use tonic::transport::{server::TcpIncoming, Server};

use sso_auth::{AuthService, PasswortHasher, TokenAussteller};
use sso_db::StorageGateway;

use crate::error::GrpcResult;
use crate::services::{proto::auth_server::AuthServer, AuthGrpc};

/// gRPC-Server-Konfiguration
#[derive(Debug, Clone)]
pub struct GrpcServerKonfig {
    pub bind_addr: SocketAddr,
    /// Zeitlimit pro Request
    pub timeout: Duration,
}

impl Default for GrpcServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 44044)),
            timeout: Duration::from_secs(10),
        }
    }
}

/// gRPC-Server fuer den Auth-Dienst
pub struct GrpcServer {
    konfig: GrpcServerKonfig,
}

impl GrpcServer {
    pub fn neu(konfig: GrpcServerKonfig) -> Self {
        Self { konfig }
    }

    /// Bindet die konfigurierte Adresse und gibt die tatsaechliche zurueck
    ///
    /// Mit Port 0 vergibt das Betriebssystem einen freien Port (Tests).
    pub async fn binden(&self) -> GrpcResult<(TcpListener, SocketAddr)> {
        let listener = TcpListener::bind(self.konfig.bind_addr).await?;
        let addr = listener.local_addr()?;
        Ok((listener, addr))
    }

    /// Startet den Server auf einem gebundenen Listener und laeuft bis
    /// `shutdown` fertig ist; laufende Requests werden noch beendet.
    pub async fn starten<S, H, T, F>(
        self,
        listener: TcpListener,
        service: Arc<AuthService<S, H, T>>,
        shutdown: F,
    ) -> GrpcResult<()>
    where
        S: StorageGateway + 'static,
        H: PasswortHasher + 'static,
        T: TokenAussteller + 'static,
        F: Future<Output = ()> + Send,
    {
        let addr = listener.local_addr()?;
        let incoming = TcpIncoming::from_listener(listener, true, None)
            .map_err(|e| std::io::Error::other(e.to_string()))?;

        tracing::info!(addr = %addr, timeout = ?self.konfig.timeout, "gRPC-Server gestartet");

        Server::builder()
            .timeout(self.konfig.timeout)
            .add_service(AuthServer::new(AuthGrpc::neu(service)))
            .serve_with_incoming_shutdown(incoming, shutdown)
            .await?;

        tracing::info!("gRPC-Server gestoppt");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_konfig() {
        let konfig = GrpcServerKonfig::default();
        assert_eq!(konfig.bind_addr.port(), 44044);
        assert_eq!(konfig.timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn binden_mit_port_null() {
        let server = GrpcServer::neu(GrpcServerKonfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            ..Default::default()
        });
        let (_listener, addr) = server.binden().await.unwrap();
        assert_ne!(addr.port(), 0);
    }
}
