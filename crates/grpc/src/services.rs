//! gRPC-Service-Implementierung des Auth-Dienstes
//!
//! Jeder Handler validiert den Request, ruft den AuthService auf und
//! bildet dessen Fehler ueber [`auth_fehler_zu_status`] ab.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use sso_auth::{AuthService, PasswortHasher, TokenAussteller};
use sso_core::{AppId, UserId};
use sso_db::StorageGateway;

use crate::error::auth_fehler_zu_status;
use crate::validation::{IsAdminAnfrage, LoginAnfrage, RegisterAnfrage};

// Generierter Code aus tonic-build
pub mod proto {
    tonic::include_proto!("auth.v1");
}

use proto::*;

/// tonic-Adapter um den AuthService
pub struct AuthGrpc<S, H, T> {
    service: Arc<AuthService<S, H, T>>,
}

impl<S, H, T> AuthGrpc<S, H, T> {
    pub fn neu(service: Arc<AuthService<S, H, T>>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<S, H, T> proto::auth_server::Auth for AuthGrpc<S, H, T>
where
    S: StorageGateway + 'static,
    H: PasswortHasher + 'static,
    T: TokenAussteller + 'static,
{
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let body = request.into_inner();
        let anfrage = RegisterAnfrage {
            email: body.email,
            password: body.password,
        };
        anfrage.pruefen()?;

        let user_id = self
            .service
            .registrieren(&anfrage.email, &anfrage.password)
            .await
            .map_err(auth_fehler_zu_status)?;

        Ok(Response::new(RegisterResponse {
            user_id: user_id.inner(),
        }))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let body = request.into_inner();
        let anfrage = LoginAnfrage {
            email: body.email,
            password: body.password,
            app_id: body.app_id,
        };
        anfrage.pruefen()?;

        let token = self
            .service
            .anmelden(&anfrage.email, &anfrage.password, AppId(anfrage.app_id))
            .await
            .map_err(auth_fehler_zu_status)?;

        Ok(Response::new(LoginResponse { token }))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let anfrage = IsAdminAnfrage {
            user_id: request.into_inner().user_id,
        };
        anfrage.pruefen()?;

        let is_admin = self
            .service
            .ist_admin(UserId(anfrage.user_id))
            .await
            .map_err(auth_fehler_zu_status)?;

        Ok(Response::new(IsAdminResponse { is_admin }))
    }
}
