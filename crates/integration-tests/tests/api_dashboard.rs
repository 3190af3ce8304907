mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, get, post, register, verified_therapist};

#[tokio::test]
async fn user_dashboard_summarizes_journals_and_posts() {
    let app = app();
    let (token, _) = register(&app, "Ada", "ada@example.com", "user").await;

    post(&app, "/api/journals/create", &token, json!({ "content": "one", "mood": "good" })).await;
    post(&app, "/api/journals/create", &token, json!({ "content": "two", "mood": "bad" })).await;
    post(&app, "/api/posts/create", &token, json!({ "content": "hello" })).await;

    let (status, body) = get(&app, "/api/dashboard/user", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["journalStats"]["totalEntries"], json!(2));
    assert_eq!(body["data"]["journalStats"]["moodCounts"]["good"], json!(1));
    assert_eq!(body["data"]["recentJournals"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["postCount"], json!(1));
}

#[tokio::test]
async fn therapist_dashboard_tracks_verification_and_requests() {
    let app = app();
    let (admin, _) = register(&app, "Root", "root@example.com", "admin").await;
    let (user, _) = register(&app, "Ada", "ada@example.com", "user").await;
    let (therapist, profile_id) = verified_therapist(&app, &admin, "tess@example.com").await;

    post(
        &app,
        &format!("/api/therapists/contact/{profile_id}"),
        &user,
        json!({ "message": "hello", "contactInfo": { "email": "ada@example.com" } }),
    )
    .await;

    let (status, body) = get(&app, "/api/dashboard/therapist", &therapist).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["verificationStatus"], json!("approved"));
    assert_eq!(body["data"]["verified"], json!(true));
    assert_eq!(body["data"]["pendingRequests"], json!(1));
    assert_eq!(body["data"]["totalRequests"], json!(1));
}

#[tokio::test]
async fn therapist_dashboard_needs_a_profile() {
    let app = app();
    let (user, _) = register(&app, "Ada", "ada@example.com", "user").await;

    let (status, body) = get(&app, "/api/dashboard/therapist", &user).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], json!("Therapist profile not found"));
}

#[tokio::test]
async fn admin_dashboard_counts_roles_and_recent_signups() {
    let app = app();
    let (admin, _) = register(&app, "Root", "root@example.com", "admin").await;
    register(&app, "Ada", "ada@example.com", "user").await;
    register(&app, "Tess", "tess@example.com", "therapist").await;

    let (status, body) = get(&app, "/api/dashboard/admin", &admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalUsers"], json!(3));
    assert_eq!(body["data"]["adminUsers"], json!(1));
    assert_eq!(body["data"]["therapistUsers"], json!(1));
    assert_eq!(body["data"]["pendingVerifications"], json!(1));
    let recent = body["data"]["recentUsers"].as_array().unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0]["email"], json!("tess@example.com"));
}
