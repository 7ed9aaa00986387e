//! Fehlertypen und Status-Abbildung fuer die gRPC-Schnittstelle

use sso_auth::AuthError;
use thiserror::Error;
use tonic::Status;

/// Fehler beim Betrieb des gRPC-Servers
#[derive(Debug, Error)]
pub enum GrpcFehler {
    #[error("Transportfehler: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("IO-Fehler: {0}")]
    Io(#[from] std::io::Error),
}

pub type GrpcResult<T> = Result<T, GrpcFehler>;

/// Bildet eine fachliche Fehlerart 1:1 auf einen gRPC-Status ab
///
/// Die Nachrichten sind fest; interne Details erreichen den Client nie.
pub fn auth_fehler_zu_status(fehler: AuthError) -> Status {
    match fehler {
        AuthError::UngueltigeAnmeldedaten => Status::invalid_argument("invalid credentials"),
        AuthError::BenutzerExistiert => Status::already_exists("user already exists"),
        AuthError::AppNichtGefunden => Status::not_found("app not found"),
        AuthError::NichtGefunden => Status::not_found("user not found"),
        AuthError::Intern => Status::internal("internal server error"),
    }
}
