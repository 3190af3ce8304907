mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, get, login, register, send};

#[tokio::test]
async fn register_login_me_round_trip() {
    let app = app();
    let (token, id) = register(&app, "Ada", "ada@example.com", "user").await;

    let (status, me) = get(&app, "/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["data"]["id"], json!(id));
    assert_eq!(me["data"]["email"], json!("ada@example.com"));
    assert_eq!(me["data"]["role"], json!("user"));
    assert!(me["data"].get("passwordHash").is_none());

    let (status, body) = login(&app, "ada@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Login successful"));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let app = app();
    register(&app, "Ada", "ada@example.com", "user").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Other",
            "email": "ADA@example.com",
            "password": "secret1",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("User already exists with this email"));
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = app();
    register(&app, "Ada", "ada@example.com", "user").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Invalid credentials"));
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Access denied. No token provided."));

    let (status, _) = send(&app, Method::GET, "/api/auth/me", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn therapist_registration_without_credentials_fails() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "name": "Half Done",
            "email": "half@example.com",
            "password": "secret1",
            "role": "therapist",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!("Specialization, license number, and experience are required for therapists")
    );
}

#[tokio::test]
async fn health_is_open() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}
