//! Integration tests for the authentication endpoint.
//!
//! Each test drives the real router over an in-memory SQLite store,
//! seeded through the repositories the same way an administrator would
//! create the data.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use gatekeeper::api::{create_router, AppState};
use gatekeeper::domain::{NewUser, Password};
use gatekeeper::infra::{
    Database, PermissionRepository, PermissionStore, RoleRepository, RoleStore, UserRepository,
    UserStore,
};

const USER_EMAIL: &str = "john_doe@example.org";
const USER_NAME: &str = "John Doe";
const USER_SECRET: &str = "any_password";
const INACTIVE_EMAIL: &str = "jane_doe@example.org";

/// Build a router over a freshly migrated in-memory store with one active
/// and one inactive account, both holding the ADMIN role.
async fn seeded_router() -> Router {
    let db = Arc::new(
        Database::connect_with("sqlite::memory:", 1)
            .await
            .expect("in-memory database"),
    );
    db.run_migrations().await.expect("migrations");

    let permissions = PermissionStore::new(db.get_connection());
    let view_roles = permissions.create("VIEW_USER_ROLES").await.unwrap();

    let roles = RoleStore::new(db.get_connection());
    let admin = roles.create("ADMIN", vec![view_roles.id]).await.unwrap();

    let users = UserStore::new(db.get_connection());
    users
        .create(NewUser {
            email: USER_EMAIL.to_string(),
            name: USER_NAME.to_string(),
            password_hash: Password::new(USER_SECRET).unwrap().into_string(),
            active: true,
            role_ids: vec![admin.id],
        })
        .await
        .unwrap();
    users
        .create(NewUser {
            email: INACTIVE_EMAIL.to_string(),
            name: "Jane Doe".to_string(),
            password_hash: Password::new(USER_SECRET).unwrap().into_string(),
            active: false,
            role_ids: vec![admin.id],
        })
        .await
        .unwrap();

    create_router(AppState::from_database(db))
}

fn auth_request(identifier: &str, secret: &str) -> Request<Body> {
    json_request(json!({ "identifier": identifier, "secret": secret }).to_string())
}

fn json_request(body: String) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/users/auth")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

#[tokio::test]
async fn authenticate_success_returns_principal() {
    let router = seeded_router().await;

    let (status, body) = send(&router, auth_request(USER_EMAIL, USER_SECRET)).await;

    assert_eq!(status, StatusCode::OK);
    let principal: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(principal["email"], USER_EMAIL);
    assert_eq!(principal["name"], USER_NAME);
    assert_eq!(principal["roles"], json!(["ADMIN"]));
    assert_eq!(principal["permissions"], json!(["VIEW_USER_ROLES"]));
}

#[tokio::test]
async fn authenticate_response_never_exposes_digest() {
    let router = seeded_router().await;

    let (status, body) = send(&router, auth_request(USER_EMAIL, USER_SECRET)).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(!text.contains("password"));
    assert!(!text.contains("secret"));
    assert!(!text.contains("argon2"));
}

#[tokio::test]
async fn authenticate_failure_returns_unauthorized() {
    let router = seeded_router().await;

    let (status, _) = send(&router, auth_request(USER_EMAIL, "wrong password")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_email_is_indistinguishable_from_wrong_secret() {
    let router = seeded_router().await;

    let (wrong_secret_status, wrong_secret_body) =
        send(&router, auth_request(USER_EMAIL, "wrong password")).await;
    let (unknown_status, unknown_body) =
        send(&router, auth_request("nobody@example.org", USER_SECRET)).await;

    assert_eq!(wrong_secret_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_secret_body, unknown_body);
}

#[tokio::test]
async fn inactive_account_is_rejected_with_same_response() {
    let router = seeded_router().await;

    let (status, body) = send(&router, auth_request(INACTIVE_EMAIL, USER_SECRET)).await;
    let (invalid_status, invalid_body) =
        send(&router, auth_request(USER_EMAIL, "wrong password")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(invalid_status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, invalid_body);
}

#[tokio::test]
async fn email_match_is_case_sensitive() {
    let router = seeded_router().await;

    let (status, _) = send(&router, auth_request("JOHN_DOE@EXAMPLE.ORG", USER_SECRET)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn repeated_attempts_get_identical_status() {
    let router = seeded_router().await;

    for _ in 0..3 {
        let (status, _) = send(&router, auth_request(USER_EMAIL, USER_SECRET)).await;
        assert_eq!(status, StatusCode::OK);
    }
    for _ in 0..3 {
        let (status, _) = send(&router, auth_request(USER_EMAIL, "wrong password")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn malformed_body_is_rejected_at_the_boundary() {
    let router = seeded_router().await;

    let (status, _) = send(&router, json_request("not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &router,
        json_request(json!({ "identifier": USER_EMAIL }).to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, auth_request("", USER_SECRET)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_database_status() {
    let router = seeded_router().await;

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "healthy");
}
