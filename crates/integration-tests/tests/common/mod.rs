//! Shared fixtures: a fully wired in-memory app and small HTTP helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use api_adapters::{build_router, AppState};
use auth_adapters::{Argon2PasswordHasher, JwtTokenIssuer};
use domains::{AccountRepo, JournalRepo, PasswordHasher, PostRepo, TherapistRepo, TokenIssuer};
use services::{
    AnalyticsService, BoardService, DashboardService, DirectoryService, JournalService,
    ModerationService, TherapistService,
};
use storage_adapters::{
    MemoryAccountRepo, MemoryJournalRepo, MemoryPostRepo, MemoryTherapistRepo,
};

pub fn app() -> Router {
    let accounts: Arc<dyn AccountRepo> = Arc::new(MemoryAccountRepo::new());
    let posts: Arc<dyn PostRepo> = Arc::new(MemoryPostRepo::new());
    let journals: Arc<dyn JournalRepo> = Arc::new(MemoryJournalRepo::new());
    let therapists: Arc<dyn TherapistRepo> = Arc::new(MemoryTherapistRepo::new());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let tokens: Arc<dyn TokenIssuer> =
        Arc::new(JwtTokenIssuer::new(&SecretString::from("test-secret"), 24));

    let state = AppState {
        directory: Arc::new(DirectoryService::new(
            accounts.clone(),
            therapists.clone(),
            hasher,
            tokens.clone(),
        )),
        board: Arc::new(BoardService::new(posts.clone())),
        journals: Arc::new(JournalService::new(journals.clone())),
        therapists: Arc::new(TherapistService::new(therapists.clone())),
        moderation: Arc::new(ModerationService::new(accounts.clone(), posts.clone())),
        analytics: Arc::new(AnalyticsService::new(
            accounts.clone(),
            posts.clone(),
            journals.clone(),
            therapists.clone(),
        )),
        dashboards: Arc::new(DashboardService::new(
            accounts.clone(),
            posts,
            journals,
            therapists,
        )),
        accounts,
        tokens,
    };
    build_router(state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");

    let response = app.clone().oneshot(request).await.expect("app responds");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body is JSON")
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post(app: &Router, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put(app: &Router, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// Registers an account and returns `(token, account_id)`.
pub async fn register(app: &Router, name: &str, email: &str, role: &str) -> (String, String) {
    let mut body = json!({
        "name": name,
        "email": email,
        "password": "secret1",
        "role": role,
    });
    if role == "therapist" {
        body["specialization"] = json!("Anxiety");
        body["licenseNumber"] = json!(format!("LIC-{email}"));
        body["experience"] = json!(5);
    }
    let (status, value) = send(app, Method::POST, "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "registration failed: {value}");
    (
        value["data"]["token"].as_str().expect("token").to_string(),
        value["data"]["user"]["id"].as_str().expect("user id").to_string(),
    )
}

pub async fn login(app: &Router, email: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "secret1" })),
    )
    .await
}

/// Registers a therapist, then has an admin approve the auto-created
/// pending profile. Returns `(therapist_token, profile_id)`.
pub async fn verified_therapist(
    app: &Router,
    admin_token: &str,
    email: &str,
) -> (String, String) {
    let (token, user_id) = register(app, "Therapist", email, "therapist").await;

    let (status, pending) = get(app, "/api/therapists/pending", admin_token).await;
    assert_eq!(status, StatusCode::OK);
    let profile_id = pending["data"]
        .as_array()
        .expect("pending list")
        .iter()
        .find(|p| p["userId"] == json!(user_id))
        .and_then(|p| p["id"].as_str())
        .expect("pending profile for the new therapist")
        .to_string();

    let (status, _) = put(
        app,
        &format!("/api/therapists/verify/{profile_id}"),
        admin_token,
        json!({ "approved": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (token, profile_id)
}
