//! Binary entry point: load settings, wire adapters into services, serve.

use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::EnvFilter;

use api_adapters::{build_router, AppState};
use auth_adapters::{Argon2PasswordHasher, JwtTokenIssuer};
use configs::Settings;
use domains::{AccountRepo, JournalRepo, PasswordHasher, PostRepo, TherapistRepo, TokenIssuer};
use services::{
    AnalyticsService, BoardService, DashboardService, DirectoryService, JournalService,
    ModerationService, TherapistService,
};
use storage_adapters::{
    MemoryAccountRepo, MemoryJournalRepo, MemoryPostRepo, MemoryTherapistRepo,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("loading settings")?;

    let accounts: Arc<dyn AccountRepo> = Arc::new(MemoryAccountRepo::new());
    let posts: Arc<dyn PostRepo> = Arc::new(MemoryPostRepo::new());
    let journals: Arc<dyn JournalRepo> = Arc::new(MemoryJournalRepo::new());
    let therapists: Arc<dyn TherapistRepo> = Arc::new(MemoryTherapistRepo::new());

    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new(
        &settings.auth.jwt_secret,
        settings.auth.token_ttl_hours,
    ));

    let directory = Arc::new(DirectoryService::new(
        accounts.clone(),
        therapists.clone(),
        hasher.clone(),
        tokens.clone(),
    ));

    if let (Some(email), Some(password)) = (
        settings.bootstrap.admin_email.as_deref(),
        settings.bootstrap.admin_password.as_ref(),
    ) {
        directory
            .ensure_bootstrap_admin(&settings.bootstrap.admin_name, email, password.expose_secret())
            .await
            .context("creating bootstrap admin")?;
    }

    let state = AppState {
        directory,
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

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "therapease listening");

    axum::serve(listener, build_router(state))
        .await
        .context("server error")?;
    Ok(())
}
