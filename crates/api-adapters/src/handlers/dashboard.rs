use axum::extract::State;
use axum::Json;

use services::{AdminDashboard, TherapistDashboard, UserDashboard};

use crate::error::{ok, ApiResult, Envelope};
use crate::extract::{AdminUser, AuthUser};
use crate::state::AppState;

pub async fn user(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
) -> ApiResult<Json<Envelope<UserDashboard>>> {
    Ok(ok(state.dashboards.user_dashboard(&account).await?))
}

pub async fn therapist(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
) -> ApiResult<Json<Envelope<TherapistDashboard>>> {
    Ok(ok(state.dashboards.therapist_dashboard(&account).await?))
}

pub async fn admin(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
) -> ApiResult<Json<Envelope<AdminDashboard>>> {
    Ok(ok(state.dashboards.admin_dashboard().await?))
}
