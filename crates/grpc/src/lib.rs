//! sso-grpc – gRPC-Schnittstelle des SSO-Dienstes
//!
//! Nimmt Requests ueber tonic entgegen, validiert die Eingaben, ruft den
//! [`sso_auth::AuthService`] auf und bildet dessen Fehlerarten auf
//! gRPC-Statuscodes ab.

pub mod error;
pub mod server;
pub mod services;
pub mod validation;

pub use error::{auth_fehler_zu_status, GrpcFehler, GrpcResult};
pub use server::{GrpcServer, GrpcServerKonfig};
pub use services::{proto, AuthGrpc};
