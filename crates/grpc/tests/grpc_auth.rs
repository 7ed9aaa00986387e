//! Ende-zu-Ende-Tests: gRPC-Client -> tonic-Server -> AuthService -> SQLite (In-Memory)

use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use tokio::sync::oneshot;
use tonic::{transport::Channel, Code};

use sso_auth::{token_pruefen, AuthService};
use sso_db::{AppRepository, SqliteDb, UserRepository};
use sso_grpc::{
    proto::{auth_client::AuthClient, IsAdminRequest, LoginRequest, RegisterRequest},
    GrpcServer, GrpcServerKonfig,
};

const TTL: Duration = Duration::from_secs(3600);
const SECRET: &[u8] = b"test-secret";

struct Suite {
    client: AuthClient<Channel>,
    db: SqliteDb,
    app_id: i64,
    _stop: oneshot::Sender<()>,
}

async fn suite() -> Suite {
    let db = SqliteDb::in_memory().await.expect("In-Memory DB");
    let app_id = db.create_app("test", SECRET).await.expect("App anlegen");

    let service = Arc::new(AuthService::neu(Arc::new(db.clone()), TTL));
    let server = GrpcServer::neu(GrpcServerKonfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        timeout: Duration::from_secs(10),
    });
    let (listener, addr) = server.binden().await.expect("Port binden");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    tokio::spawn(server.starten(listener, service, async move {
        let _ = stop_rx.await;
    }));

    let client = AuthClient::connect(format!("http://{addr}"))
        .await
        .expect("Verbindung zum gRPC-Server");

    Suite {
        client,
        db,
        app_id: app_id.inner(),
        _stop: stop_tx,
    }
}

fn jetzt() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[tokio::test]
async fn happy_path() {
    let mut sut = suite().await;

    let user_id = sut
        .client
        .register(RegisterRequest {
            email: "a@b.com".into(),
            password: "Passw0rd!".into(),
        })
        .await
        .expect("Register")
        .into_inner()
        .user_id;
    assert!(user_id > 0);

    let token = sut
        .client
        .login(LoginRequest {
            email: "a@b.com".into(),
            password: "Passw0rd!".into(),
            app_id: sut.app_id,
        })
        .await
        .expect("Login")
        .into_inner()
        .token;
    let login_zeit = jetzt();
    assert!(!token.is_empty());

    let claims = token_pruefen(&token, SECRET).expect("Token muss mit App-Secret gueltig sein");
    assert_eq!(claims.uid, user_id);
    assert_eq!(claims.email, "a@b.com");
    assert_eq!(claims.app_id, sut.app_id);
    assert!((claims.exp - (login_zeit + TTL.as_secs() as i64)).abs() <= 1);
}

#[tokio::test]
async fn register_zweimal() {
    let mut sut = suite().await;
    let anfrage = RegisterRequest {
        email: "twice@b.com".into(),
        password: "Passw0rd!".into(),
    };

    sut.client.register(anfrage.clone()).await.unwrap();
    let status = sut.client.register(anfrage).await.unwrap_err();

    assert_eq!(status.code(), Code::AlreadyExists);
    assert_eq!(status.message(), "user already exists");
}

#[tokio::test]
async fn login_falsches_passwort_und_unbekannter_benutzer() {
    let mut sut = suite().await;
    sut.client
        .register(RegisterRequest {
            email: "a@b.com".into(),
            password: "Passw0rd!".into(),
        })
        .await
        .unwrap();

    let falsch = sut
        .client
        .login(LoginRequest {
            email: "a@b.com".into(),
            password: "wrong-password".into(),
            app_id: sut.app_id,
        })
        .await
        .unwrap_err();
    let unbekannt = sut
        .client
        .login(LoginRequest {
            email: "nobody@b.com".into(),
            password: "Passw0rd!".into(),
            app_id: sut.app_id,
        })
        .await
        .unwrap_err();

    assert_eq!(falsch.code(), Code::InvalidArgument);
    assert_eq!(falsch.code(), unbekannt.code());
    assert_eq!(falsch.message(), unbekannt.message());
}

#[tokio::test]
async fn login_unbekannte_app() {
    let mut sut = suite().await;
    sut.client
        .register(RegisterRequest {
            email: "a@b.com".into(),
            password: "Passw0rd!".into(),
        })
        .await
        .unwrap();

    let status = sut
        .client
        .login(LoginRequest {
            email: "a@b.com".into(),
            password: "Passw0rd!".into(),
            app_id: 999,
        })
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "app not found");
}

#[tokio::test]
async fn is_admin() {
    let mut sut = suite().await;
    let user_id = sut
        .client
        .register(RegisterRequest {
            email: "admin@b.com".into(),
            password: "Passw0rd!".into(),
        })
        .await
        .unwrap()
        .into_inner()
        .user_id;

    let antwort = sut.client.is_admin(IsAdminRequest { user_id }).await.unwrap();
    assert!(!antwort.into_inner().is_admin);

    sut.db.set_admin(user_id.into(), true).await.unwrap();
    let antwort = sut.client.is_admin(IsAdminRequest { user_id }).await.unwrap();
    assert!(antwort.into_inner().is_admin);

    let status = sut
        .client
        .is_admin(IsAdminRequest { user_id: 4242 })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn validierung_vor_dem_service() {
    let mut sut = suite().await;

    let status = sut
        .client
        .register(RegisterRequest {
            email: String::new(),
            password: String::new(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(
        status.message(),
        "validation error: Field email is required, Field password is required"
    );

    let status = sut
        .client
        .login(LoginRequest {
            email: "a@b.com".into(),
            password: "Passw0rd!".into(),
            app_id: 0,
        })
        .await
        .unwrap_err();
    assert_eq!(status.message(), "validation error: Field app_id is required");
}
