//! Route table. Everything except `/health` lives under `/api`; auth and
//! role gates are the extractors on each handler.

use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, auth, dashboard, journals, posts, therapists};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/logout", get(auth::logout));

    let post_routes = Router::new()
        .route("/getAll", get(posts::list))
        .route("/create", post(posts::create))
        .route("/reply/{post_id}", post(posts::reply))
        .route("/flag/{post_id}", post(posts::flag))
        .route("/my-posts", get(posts::my_posts))
        .route("/{post_id}", delete(posts::delete));

    let journal_routes = Router::new()
        .route("/create", post(journals::create))
        .route("/", get(journals::list))
        .route("/stats", get(journals::stats))
        .route(
            "/{id}",
            get(journals::get).put(journals::update).delete(journals::delete),
        );

    let therapist_routes = Router::new()
        .route("/", get(therapists::list))
        .route("/pending", get(therapists::pending))
        .route("/my-requests", get(therapists::my_requests))
        .route("/apply", post(therapists::apply))
        .route("/contact/{therapist_id}", post(therapists::contact))
        .route("/verify/{therapist_id}", put(therapists::verify))
        .route("/{id}", get(therapists::get));

    let admin_routes = Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}/ban", put(admin::ban_user))
        .route("/users/{id}/unban", put(admin::unban_user))
        .route("/posts/flagged", get(admin::flagged_posts))
        .route("/posts/{id}/remove", put(admin::remove_post))
        .route("/posts/{id}/restore", put(admin::restore_post))
        .route("/analytics", get(admin::analytics));

    let dashboard_routes = Router::new()
        .route("/user", get(dashboard::user))
        .route("/therapist", get(dashboard::therapist))
        .route("/admin", get(dashboard::admin));

    let api = Router::new()
        .nest("/auth", auth_routes)
        .nest("/posts", post_routes)
        .nest("/journals", journal_routes)
        .nest("/therapists", therapist_routes)
        .nest("/admin", admin_routes)
        .nest("/dashboard", dashboard_routes);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
