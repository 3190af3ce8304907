use axum::extract::State;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use domains::{Account, Role};
use services::Registration;

use crate::error::{ok, ok_with_message, ApiResult, Envelope};
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
    pub experience: Option<u32>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

fn default_role() -> Role {
    Role::User
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: Account,
    pub token: String,
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<Json<Envelope<AuthPayload>>> {
    let authenticated = state
        .directory
        .register(Registration {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            specialization: req.specialization,
            license_number: req.license_number,
            experience: req.experience,
            phone: req.phone,
            date_of_birth: req.date_of_birth,
        })
        .await?;
    Ok(ok_with_message(
        AuthPayload {
            user: authenticated.account,
            token: authenticated.token,
        },
        "User registered successfully",
    ))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<Envelope<AuthPayload>>> {
    let authenticated = state.directory.login(&req.email, &req.password).await?;
    Ok(ok_with_message(
        AuthPayload {
            user: authenticated.account,
            token: authenticated.token,
        },
        "Login successful",
    ))
}

pub async fn me(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
) -> ApiResult<Json<Envelope<Account>>> {
    Ok(ok(state.directory.me(account.id).await?))
}

/// Stateless tokens: logout is client-side, the endpoint just confirms.
pub async fn logout(AuthUser(_): AuthUser) -> Json<Envelope<()>> {
    ok_with_message((), "Logged out successfully")
}
